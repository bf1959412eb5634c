//! The AI service: one query in, one response out.
//!
//! In shell mode the backend's answer must pass script validation and is
//! returned with a `#!/bin/bash` line in front of it.

use crate::completion::{CompletionBackend, CompletionRequest};
use crate::error::CommanderError;
use crate::logging::Logger;
use crate::messages::{SHEBANG, SHELL_CONVERSION_FAILED};
use crate::shell_script::{normalize_script, BashSyntaxValidator, ScriptValidator};

/// Sends queries to a completion backend and post-processes the answer.
pub struct AiService<'a> {
    logger: &'a Logger,
    backend: Box<dyn CompletionBackend>,
    validator: Box<dyn ScriptValidator>,
}

impl<'a> AiService<'a> {
    /// Creates a service that validates scripts with `bash -n`.
    pub fn new(logger: &'a Logger, backend: Box<dyn CompletionBackend>) -> Self {
        Self::with_validator(logger, backend, Box::new(BashSyntaxValidator::new()))
    }

    pub fn with_validator(
        logger: &'a Logger,
        backend: Box<dyn CompletionBackend>,
        validator: Box<dyn ScriptValidator>,
    ) -> Self {
        Self {
            logger,
            backend,
            validator,
        }
    }

    /// Gets the backend's answer to `query`.
    ///
    /// With `enforce_shell` the answer must pass script validation and comes
    /// back prefixed with `#!/bin/bash`; otherwise it is returned untouched.
    ///
    /// # Errors
    ///
    /// Backend failures propagate as-is. A response rejected by the validator
    /// yields [`CommanderError::ShellConversion`].
    pub async fn get_response(
        &self,
        query: &str,
        enforce_shell: bool,
    ) -> Result<String, CommanderError> {
        self.logger.log(&format!("Processing query: {}", query));

        let response = self
            .backend
            .complete(&CompletionRequest {
                query,
                enforce_shell,
            })
            .await?;

        if !enforce_shell {
            return Ok(response);
        }

        let script = normalize_script(&response);
        if let Err(reason) = self.validator.validate(&script) {
            self.logger.log(SHELL_CONVERSION_FAILED);
            return Err(CommanderError::ShellConversion(reason));
        }
        Ok(format!("{}\n{}", SHEBANG, script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::EchoBackend;
    use crate::logging::test_support::capture;
    use async_trait::async_trait;

    struct FixedBackend(&'static str);

    #[async_trait]
    impl CompletionBackend for FixedBackend {
        async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, CommanderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, CommanderError> {
            Err(CommanderError::Completion("service unavailable".to_string()))
        }
    }

    struct Accept;

    impl ScriptValidator for Accept {
        fn validate(&self, _script: &str) -> Result<(), String> {
            Ok(())
        }
    }

    struct Reject;

    impl ScriptValidator for Reject {
        fn validate(&self, _script: &str) -> Result<(), String> {
            Err("syntax error near unexpected token".to_string())
        }
    }

    #[tokio::test]
    async fn test_plain_response_is_unmodified() {
        let (logger, _) = capture(false);
        let service = AiService::with_validator(&logger, Box::new(FixedBackend("  ```raw```\n")), Box::new(Reject));
        let response = service.get_response("anything", false).await.unwrap();
        assert_eq!(response, "  ```raw```\n");
    }

    #[tokio::test]
    async fn test_echo_placeholder_without_shebang() {
        let (logger, _) = capture(false);
        let service = AiService::with_validator(&logger, Box::new(EchoBackend), Box::new(Accept));
        let response = service.get_response("list files", false).await.unwrap();
        assert_eq!(response, "Response to: list files");
    }

    #[tokio::test]
    async fn test_shell_mode_prefixes_shebang() {
        let (logger, _) = capture(false);
        let service = AiService::with_validator(&logger, Box::new(EchoBackend), Box::new(Accept));
        let response = service.get_response("list files", true).await.unwrap();
        assert_eq!(response, "#!/bin/bash\nResponse to: list files");
    }

    #[tokio::test]
    async fn test_shell_mode_normalizes_fenced_response() {
        let (logger, _) = capture(false);
        let service = AiService::with_validator(
            &logger,
            Box::new(FixedBackend("```bash\n#!/bin/bash\nls -la\n```")),
            Box::new(Accept),
        );
        let response = service.get_response("list files", true).await.unwrap();
        assert_eq!(response, "#!/bin/bash\nls -la");
    }

    #[tokio::test]
    async fn test_rejected_script_fails_and_logs() {
        let (logger, buffer) = capture(true);
        let service = AiService::with_validator(&logger, Box::new(EchoBackend), Box::new(Reject));
        let err = service.get_response("list files", true).await.unwrap_err();

        assert!(matches!(err, CommanderError::ShellConversion(_)));
        assert_eq!(
            buffer.contents(),
            "[LOG]: Processing query: list files\n\
             [LOG]: Error: Cannot convert response to Shell script\n"
        );
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let (logger, _) = capture(false);
        let service = AiService::with_validator(&logger, Box::new(FailingBackend), Box::new(Accept));
        let err = service.get_response("hi", true).await.unwrap_err();
        assert!(matches!(err, CommanderError::Completion(_)));
    }
}
