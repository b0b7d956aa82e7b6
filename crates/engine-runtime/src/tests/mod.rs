mod flow;
mod loader;
