
pub mod reconstruct_builtins;
pub mod reconstruct_decltype;
pub mod reconstruct_pointers;
