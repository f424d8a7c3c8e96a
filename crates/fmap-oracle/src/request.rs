//! Chat-completions request construction.

use std::collections::BTreeSet;

use fmap_core::MethodRecord;
use serde::Serialize;

/// System message sent with every request.
pub const SYSTEM_PROMPT: &str = "You are an assistant that outputs only structured JSON data.";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Body of `POST {endpoint}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl OracleRequest {
    /// Build the request for one method record.
    #[must_use]
    pub fn for_record(record: &MethodRecord, model: &str, temperature: f32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(record),
                },
            ],
            temperature,
        }
    }

    /// The user message, i.e. the prompt proper.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map_or("", |m| m.content.as_str())
    }
}

/// Render the mapping prompt for a method.
///
/// Embeds the code, the documentation, the variable and call candidates,
/// the matching rules, and one worked example.
#[must_use]
pub fn build_prompt(record: &MethodRecord) -> String {
    format!(
        r#"You are an expert in code semantics. Analyze the Java method below and map every symbol of its formula to the code that implements it.

### Input
1. Code:
```java
{code}
```
2. Formula: {documentation}
3. Available variables: {variables}
4. Method calls: {calls}

### Task
Extract ALL symbols of the formula, both the result on the left of `=` and every parameter on the right, and find the code that implements each one.

### Matching rules
1. Every symbol that appears in the formula must be an output key.
2. Priority for each key, highest first:
   a. A variable whose name matches the symbol's meaning (e.g. `m` -> `mass`). Use the variable name even if the variable is computed by a complex expression.
   b. A method call or expression that computes the symbol directly (e.g. `term` -> `b.sqr(c)`). Keep the full call text.
   c. A numeric constant written in the code (e.g. `9.8`).
   d. null, when nothing in the code implements the symbol. Never fill in an unrelated variable.
3. The symbol on the left-hand side of the equation is the RESULT. It corresponds to the return statement: if no variable holds it, map it to the returned expression, or null if that cannot be extracted. Never map it to an input parameter.
4. Do not output keys that do not appear in the formula text.

### Example
Formula: R = base + term
Code: return sum(base, calc(freq));
Output:
{{"R": "sum(base, calc(freq))", "base": "base", "term": "calc(freq)"}}

Output only the JSON object."#,
        code = record.code,
        documentation = record.documentation,
        variables = json_list(&record.variables),
        calls = json_list(&record.calls),
    )
}

fn json_list(items: &BTreeSet<String>) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn energy_record() -> MethodRecord {
        MethodRecord {
            name: "calculateEnergy".into(),
            documentation: "Formula: E = m * c^2".into(),
            variables: ["energy", "mass", "speedOfLight"]
                .into_iter()
                .map(String::from)
                .collect(),
            calls: BTreeSet::new(),
            code: "public double calculateEnergy(double mass) {\n    return mass;\n}".into(),
            start_line: 3,
        }
    }

    #[test]
    fn prompt_embeds_record_fields() {
        let prompt = build_prompt(&energy_record());
        assert!(prompt.contains("public double calculateEnergy(double mass) {"));
        assert!(prompt.contains("2. Formula: Formula: E = m * c^2"));
        assert!(prompt.contains(r#"3. Available variables: ["energy","mass","speedOfLight"]"#));
        assert!(prompt.contains("4. Method calls: []"));
    }

    #[test]
    fn prompt_carries_rules_and_example() {
        let prompt = build_prompt(&energy_record());
        assert!(prompt.contains("Never map it to an input parameter."));
        assert!(prompt.contains("Do not output keys that do not appear in the formula text."));
        assert!(prompt.contains(
            r#"{"R": "sum(base, calc(freq))", "base": "base", "term": "calc(freq)"}"#
        ));
    }

    #[test]
    fn request_has_system_then_user() {
        let request = OracleRequest::for_record(&energy_record(), "qwen-max", 0.0);
        let roles: Vec<&str> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "user"]);
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.prompt(), build_prompt(&energy_record()));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "qwen-max");
        assert_eq!(body["messages"][1]["role"], "user");
    }
}
