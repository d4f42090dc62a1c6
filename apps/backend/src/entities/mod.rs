pub mod clientes;
pub mod usuarios;

pub use clientes::Entity as Clientes;
pub use clientes::Model as Cliente;
pub use usuarios::Entity as Usuarios;
pub use usuarios::Model as Usuario;
