pub mod io;
pub mod slice;
