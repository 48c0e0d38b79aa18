mod backend_tests;
mod error;
mod protocol;
mod session;
mod transport;
