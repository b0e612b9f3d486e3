/// Build-script helper that runs rowgen generation for a config file.
///
/// Writes the generated column enums to `OUT_DIR`, forwards diagnostics as
/// cargo warnings, and evaluates to `Result<Generation, Error>`.
#[macro_export]
macro_rules! build {
    ($config:expr) => {{
        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", $config);

        match ::std::env::var_os("OUT_DIR") {
            Some(out_dir) => ::rowgen::build::emit($config, out_dir).map(|generation| {
                for warning in generation.warnings() {
                    println!("cargo:warning={warning}");
                }

                generation
            }),
            None => Err(::rowgen::build::Error::MissingOutDir),
        }
    }};
}
