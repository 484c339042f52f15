//! Code-assist prompts
//!
//! Each function wraps source code in a fixed instruction for one task.
//! The numbered lists are what the model is asked to cover, so their
//! wording is part of the contract with the inference server.

/// Language tag used when the caller does not supply one
pub const DEFAULT_LANGUAGE: &str = "cpp";

/// Code-assist tasks that take a source snippet and a language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTask {
    /// Review code quality, bugs, performance, practices and security
    Analyze,
    /// Propose concrete improvements
    Suggest,
    /// Write documentation comments
    Document,
}

impl CodeTask {
    /// Build the prompt for this task
    ///
    /// # Examples
    ///
    /// ```
    /// use ollama_assist::prompts::CodeTask;
    ///
    /// let prompt = CodeTask::Analyze.prompt("int main() {}", "cpp");
    /// assert!(prompt.contains("following cpp code"));
    /// ```
    pub fn prompt(&self, code: &str, language: &str) -> String {
        match self {
            CodeTask::Analyze => analyze_code_prompt(code, language),
            CodeTask::Suggest => suggest_improvements_prompt(code, language),
            CodeTask::Document => generate_documentation_prompt(code, language),
        }
    }
}

/// Prompt asking for a code review
pub fn analyze_code_prompt(code: &str, language: &str) -> String {
    format!(
        "As a code analysis expert, please analyze the following {language} code:\n\n\
         {code}\n\n\
         Provide feedback on:\n\
         1. Code quality and structure\n\
         2. Potential issues or bugs\n\
         3. Performance considerations\n\
         4. Best practices compliance\n\
         5. Security concerns (if any)\n\n\
         Keep your analysis concise but thorough."
    )
}

/// Prompt asking for improvement suggestions
pub fn suggest_improvements_prompt(code: &str, language: &str) -> String {
    format!(
        "Please suggest improvements for the following {language} code:\n\n\
         {code}\n\n\
         Focus on:\n\
         1. Code readability and maintainability\n\
         2. Performance optimizations\n\
         3. Modern language features\n\
         4. Error handling\n\
         5. Code organization\n\n\
         Provide specific, actionable suggestions."
    )
}

/// Prompt asking to explain a compiler or runtime error
///
/// The related code block is left out when `code` is empty.
pub fn explain_error_prompt(error_message: &str, code: &str) -> String {
    let mut prompt = format!("Please explain this compilation/runtime error:\n\n{error_message}\n\n");

    if !code.is_empty() {
        prompt.push_str(&format!("Related code:\n{code}\n\n"));
    }

    prompt.push_str(
        "Please provide:\n\
         1. What the error means\n\
         2. Common causes\n\
         3. How to fix it\n\
         4. How to prevent similar errors\n\n\
         Keep the explanation clear and practical.",
    );
    prompt
}

/// Prompt asking for documentation comments
pub fn generate_documentation_prompt(code: &str, language: &str) -> String {
    format!(
        "Generate comprehensive documentation for the following {language} code:\n\n\
         {code}\n\n\
         Include:\n\
         1. Function/class descriptions\n\
         2. Parameter explanations\n\
         3. Return value descriptions\n\
         4. Usage examples\n\
         5. Any important notes or warnings\n\n\
         Format as standard code documentation comments."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "int main() { int x = 5; return x; }";

    #[test]
    fn test_analyze_prompt_exact() {
        assert_eq!(
            analyze_code_prompt(CODE, "cpp"),
            "As a code analysis expert, please analyze the following cpp code:\n\n\
             int main() { int x = 5; return x; }\n\n\
             Provide feedback on:\n1. Code quality and structure\n2. Potential issues or bugs\n\
             3. Performance considerations\n4. Best practices compliance\n\
             5. Security concerns (if any)\n\nKeep your analysis concise but thorough."
        );
    }

    #[test]
    fn test_suggest_prompt_lists_focus_points() {
        let prompt = suggest_improvements_prompt(CODE, "rust");
        assert!(prompt.starts_with("Please suggest improvements for the following rust code:\n\n"));
        assert!(prompt.contains(&format!("{CODE}\n\nFocus on:\n")));
        assert!(prompt.contains("3. Modern language features\n"));
        assert!(prompt.ends_with("5. Code organization\n\nProvide specific, actionable suggestions."));
    }

    #[test]
    fn test_explain_prompt_with_code() {
        let prompt = explain_error_prompt("error C2065: 'y': undeclared identifier", CODE);
        let error_at = prompt.find("error C2065").unwrap();
        let code_at = prompt.find("Related code:\n").unwrap();
        assert!(error_at < code_at);
        assert!(prompt.contains(&format!("Related code:\n{CODE}\n\nPlease provide:\n")));
        assert!(prompt.ends_with(
            "4. How to prevent similar errors\n\nKeep the explanation clear and practical."
        ));
    }

    #[test]
    fn test_explain_prompt_without_code() {
        let prompt = explain_error_prompt("segfault", "");
        assert!(!prompt.contains("Related code"));
        assert!(prompt.starts_with(
            "Please explain this compilation/runtime error:\n\nsegfault\n\nPlease provide:\n"
        ));
    }

    #[test]
    fn test_documentation_prompt() {
        let prompt = generate_documentation_prompt(CODE, "cpp");
        assert!(prompt.contains("Generate comprehensive documentation for the following cpp code:"));
        assert!(prompt.contains("2. Parameter explanations\n3. Return value descriptions\n"));
        assert!(prompt.ends_with("Format as standard code documentation comments."));
    }

    #[test]
    fn test_code_task_dispatch() {
        assert_eq!(
            CodeTask::Suggest.prompt(CODE, "c"),
            suggest_improvements_prompt(CODE, "c")
        );
        assert_eq!(
            CodeTask::Document.prompt(CODE, DEFAULT_LANGUAGE),
            generate_documentation_prompt(CODE, "cpp")
        );
    }
}
