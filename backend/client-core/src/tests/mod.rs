mod protocol;
mod render;
