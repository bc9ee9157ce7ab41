//! Argument vector preflight.

use std::ffi::OsString;

use crate::error::ConfigurationError;

/// A checked argument vector: program name first, every token UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv {
    program: String,
    arguments: Vec<String>,
}

impl Argv {
    /// Validate raw OS arguments, e.g. `std::env::args_os()`.
    pub fn from_os<I, S>(raw: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut tokens = Vec::new();
        for (index, token) in raw.into_iter().enumerate() {
            let token = token
                .into()
                .into_string()
                .map_err(|_| ConfigurationError::NonUnicodeArgument { index })?;
            tokens.push(token);
        }
        Self::from_strings(tokens)
    }

    pub fn from_strings<I, S>(raw: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = raw.into_iter().map(Into::into);
        let program = tokens.next().ok_or(ConfigurationError::MissingProgramName)?;
        Ok(Self {
            program,
            arguments: tokens.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Everything after the program name.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_is_split_off() {
        let argv = Argv::from_strings(["calculate", "power", "-x=2"]).unwrap();
        assert_eq!(argv.program(), "calculate");
        assert_eq!(argv.arguments(), ["power", "-x=2"]);
    }

    #[test]
    fn test_empty_vector_is_a_configuration_error() {
        let err = Argv::from_strings(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingProgramName));
    }

    #[test]
    fn test_program_name_only() {
        let argv = Argv::from_os(["calculate"]).unwrap();
        assert!(argv.arguments().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_argument_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let err = Argv::from_os([OsString::from("calculate"), bad]).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonUnicodeArgument { index: 1 }
        ));
    }
}
