use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("missing required registry \"{name}\"")]
    MissingRequiredRegistry { name: String },
}
