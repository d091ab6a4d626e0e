pub mod guards;

pub mod home;
pub use self::home::home;

pub mod login;
pub mod recover;
pub mod signup;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const RECOVER_PATH: &str = "/login/recover";
