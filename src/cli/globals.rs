use secrecy::SecretString;

#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub db_password: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(db_password: Option<SecretString>) -> Self {
        Self { db_password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(Some(SecretString::from("hunter2")));
        assert_eq!(
            args.db_password.as_ref().map(ExposeSecret::expose_secret),
            Some("hunter2")
        );
        assert!(GlobalArgs::default().db_password.is_none());
    }
}
