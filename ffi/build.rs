//! Generates `include/joke_ffi.h` for native hosts.

use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = PathBuf::from(
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"),
    );
    let header = crate_dir.join("include").join("joke_ffi.h");

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("JOKE_FFI_H")
        .with_documentation(true)
        .generate();

    match generated {
        Ok(bindings) => {
            if let Err(err) = std::fs::create_dir_all(crate_dir.join("include")) {
                println!("cargo:warning=cannot create include dir: {err}");
                return;
            }
            bindings.write_to_file(&header);
        }
        Err(err) => println!("cargo:warning=skipping C header generation: {err}"),
    }
}
