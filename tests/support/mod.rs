pub mod sleeper;
pub mod socket_guard;
