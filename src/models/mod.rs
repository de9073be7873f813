pub mod alert;
pub mod enums;
pub mod medicine;

pub use alert::*;
pub use enums::*;
pub use medicine::*;
