fn main() {
    // UniFFI scaffolding comes from uniffi::setup_scaffolding!() in ffi.rs,
    // there is no UDL file to compile
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
