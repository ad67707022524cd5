use derive_new::new;

#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(new, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
