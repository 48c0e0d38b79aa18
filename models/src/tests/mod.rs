mod session;
mod socket_target;
