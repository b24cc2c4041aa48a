//! Common board types and jump rules shared by the Peg Solitaire solver
//! and CLI.

pub mod board;
pub mod jump;
pub mod layout;
