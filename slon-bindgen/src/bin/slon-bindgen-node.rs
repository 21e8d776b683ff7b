//! Generate Python bindings for `slon/Scene/Node.h`.

use slon_bindgen::config::Variant;

fn main() -> anyhow::Result<()> {
    slon_bindgen::cli::main_with(Variant::SceneNode)
}
