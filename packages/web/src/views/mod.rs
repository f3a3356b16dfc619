mod login;
pub use login::Login;

mod usuarios;
pub use usuarios::Usuarios;
