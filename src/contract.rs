//! Call-site adapters: bind descriptors to a callable's declared parameters,
//! return value, and resolved ("promised") value.
//!
//! Parameter names are declared explicitly; nothing here introspects source
//! text. A contract is built once next to the function it guards and then
//! consulted on every call:
//!
//! ```rust
//! use descry::descriptor::{number, string};
//! use descry::{Contract, Value};
//!
//! let contract = Contract::new("greet")
//!     .param("name", string())
//!     .param("times", number())
//!     .returns(string());
//!
//! let args = [Value::from("hi"), Value::from(3.0)];
//! assert!(contract.check_args(&args).is_ok());
//! assert!(contract.check_args(&[Value::from(5.0)]).is_err());
//! ```

use crate::descriptor::Descriptor;
use crate::diagnostics::DescryError;
use crate::validator::validate;
use crate::value::Value;

#[derive(Debug, Clone)]
struct Param {
    name: String,
    descriptor: Descriptor,
}

/// Declared parameter, return-value, and promised-value descriptors for one
/// callable.
#[derive(Debug, Clone)]
pub struct Contract {
    callee: String,
    params: Vec<Param>,
    returns: Option<Descriptor>,
    promises: Option<Descriptor>,
}

impl Contract {
    pub fn new(callee: impl Into<String>) -> Self {
        Self {
            callee: callee.into(),
            params: Vec::new(),
            returns: None,
            promises: None,
        }
    }

    /// Declares the next positional parameter.
    pub fn param(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.params.push(Param {
            name: name.into(),
            descriptor,
        });
        self
    }

    /// Declares the return-value descriptor.
    pub fn returns(mut self, descriptor: Descriptor) -> Self {
        self.returns = Some(descriptor);
        self
    }

    /// Declares the descriptor for the resolved value of an asynchronous
    /// result. The caller resolves its own future and hands the value to
    /// [`Contract::check_promised`]; there is no cancellation to model.
    pub fn promises(mut self, descriptor: Descriptor) -> Self {
        self.promises = Some(descriptor);
        self
    }

    pub fn callee(&self) -> &str {
        &self.callee
    }

    /// Validates positional arguments against the declared parameters, in
    /// order, stopping at the first failure. Missing arguments validate as
    /// `Nil`; arguments beyond the declared parameters are ignored.
    pub fn check_args(&self, args: &[Value]) -> Result<(), DescryError> {
        const MISSING: Value = Value::Nil;
        for (position, param) in self.params.iter().enumerate() {
            let value = args.get(position).unwrap_or(&MISSING);
            if let Some(mismatch) = validate(&param.name, value, &param.descriptor) {
                return Err(DescryError::mismatch(self.signature(), &mismatch));
            }
        }
        Ok(())
    }

    /// Validates a return value as the synthetic parameter `return value`.
    pub fn check_return(&self, value: &Value) -> Result<(), DescryError> {
        self.check_synthetic(self.returns.as_ref(), "return value", value)
    }

    /// Validates a resolved value as the synthetic parameter
    /// `promised value`.
    pub fn check_promised(&self, value: &Value) -> Result<(), DescryError> {
        self.check_synthetic(self.promises.as_ref(), "promised value", value)
    }

    /// Validates arguments, invokes the callable, validates its return
    /// value, and yields it.
    pub fn enforce(
        &self,
        args: &[Value],
        call: impl FnOnce(&[Value]) -> Value,
    ) -> Result<Value, DescryError> {
        self.check_args(args)?;
        let returned = call(args);
        self.check_return(&returned)?;
        Ok(returned)
    }

    fn check_synthetic(
        &self,
        descriptor: Option<&Descriptor>,
        label: &str,
        value: &Value,
    ) -> Result<(), DescryError> {
        let Some(descriptor) = descriptor else {
            return Ok(());
        };
        match validate(label, value, descriptor) {
            Some(mismatch) => Err(DescryError::mismatch(&self.callee, &mismatch)),
            None => Ok(()),
        }
    }

    // "greet(name, times)", the callee form used in argument mismatches.
    fn signature(&self) -> String {
        let names: Vec<&str> = self.params.iter().map(|p| p.name.as_str()).collect();
        format!("{}({})", self.callee, names.join(", "))
    }
}
