//! Value model: dynamic values, container handles and terminal type tags.

pub mod container;
pub mod value;
pub mod value_type;
