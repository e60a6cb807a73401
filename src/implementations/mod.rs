pub mod distributed;
pub mod rayon;
pub mod single;
