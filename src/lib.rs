pub use crate::contract::Contract;
pub use crate::descriptor::Descriptor;
pub use crate::diagnostics::DescryError;
pub use crate::owner::OwnerId;
pub use crate::validator::{validate, MatchResult, Mismatch};
pub use crate::value::{ClassSpec, Instance, Value};

pub mod collection;
pub mod contract;
pub mod curry;
pub mod debounce;
pub mod descriptor;
pub mod diagnostics;
pub mod memo;
pub mod owner;
pub mod validator;
pub mod value;
