use crate::error::Error;
use arch::{inst::MAX_ADDRESS, symbol::VAR_BASE};
use serde::Deserialize;

/// Capacities of the buffers and tables a translation allocates up front.
/// Running past any of them aborts the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub chars: usize,
    pub tokens: usize,
    pub insts: usize,
    pub labels: usize,
    pub vars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            chars: 1 << 19,
            tokens: 1 << 17,
            insts: MAX_ADDRESS as usize,
            labels: 4513,
            vars: 131,
        }
    }
}

impl Limits {
    /// Reads limits from a YAML file. Missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self, Error> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_string(), e))?;
        serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse(path.to_string(), e))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.chars == 0 || self.tokens == 0 || self.labels == 0 || self.vars == 0 {
            return Err(Error::Config("capacities must be non-zero".to_string()));
        }
        // Label values are instruction indices and must fit an address.
        if self.insts > MAX_ADDRESS as usize {
            return Err(Error::Config(format!(
                "insts must be at most {}, got {}",
                MAX_ADDRESS, self.insts
            )));
        }
        let max_vars = (MAX_ADDRESS - VAR_BASE) as usize;
        if self.vars > max_vars {
            return Err(Error::Config(format!(
                "vars must be at most {}, got {}",
                max_vars, self.vars
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Limits::default().validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let limits: Limits = serde_yaml::from_str("vars: 4\nlabels: 8\n").unwrap();
        assert_eq!(limits.vars, 4);
        assert_eq!(limits.labels, 8);
        assert_eq!(limits.tokens, Limits::default().tokens);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(serde_yaml::from_str::<Limits>("variables: 4\n").is_err());
    }

    #[test]
    fn too_many_vars() {
        let limits = Limits {
            vars: 0x7FF0,
            ..Limits::default()
        };
        assert!(matches!(limits.validate(), Err(Error::Config(_))));
        let limits = Limits {
            vars: 0x7FEF,
            ..Limits::default()
        };
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn zero_capacity() {
        let limits = Limits {
            labels: 0,
            ..Limits::default()
        };
        assert!(matches!(limits.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.yaml");
        std::fs::write(&path, "vars: 2\n").unwrap();
        let limits = Limits::load(path.to_str().unwrap()).unwrap();
        assert_eq!(limits.vars, 2);
    }
}
