/// Build-script helper that generates framing artifacts into `OUT_DIR`.
///
/// Expands to a block evaluating to the written [`Artifacts`](crate::Artifacts),
/// so it can be used once per protocol description. Errors are propagated
/// with `?`, so the build script's `main` must return a `Result`.
#[macro_export]
macro_rules! build {
    ($description:expr) => {
        $crate::build!($description, $crate::BuildConfig::default())
    };
    ($description:expr, $config:expr) => {{
        let description = $description;
        let description = ::std::path::Path::new(&description);

        //
        // CARGO
        //

        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", description.display());
        println!("cargo:rerun-if-env-changed={}", $crate::RUNTIME_CRATE_ENV);

        let out_dir = ::std::env::var("OUT_DIR")?;

        //
        // FRAMING CODE
        //

        let config: $crate::BuildConfig = $config;
        let artifacts = $crate::generate_from_path(description, &config.with_env_overrides())?;
        $crate::write_artifacts(&artifacts, &out_dir)?;

        artifacts
    }};
}
