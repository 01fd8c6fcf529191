mod tree;
mod unit;
mod value;

pub use tree::{Localization, Node};
pub use unit::{FunctionUnit, LocaleFn, LocalizedUnit};
pub use value::{Params, Value};
