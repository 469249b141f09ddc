fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = match std::env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("RICKMORTY_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(format!("{out_dir}/rickmorty.h"));
        }
        // Header generation is best-effort.
        Err(e) => println!("cargo:warning=cbindgen: {e}"),
    }
}
