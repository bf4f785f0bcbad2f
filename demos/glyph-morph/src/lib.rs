use wasm_bindgen::prelude::*;

mod config;

swarm_web::export_swarm!(config::swarm_config(), "glyph-morph");
