pub mod options;
pub mod secrets;
pub mod settings;
pub mod validator;
