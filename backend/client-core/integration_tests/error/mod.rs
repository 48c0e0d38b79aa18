mod config;
mod runtime;
mod ws;
