fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile auth service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/auth.proto"], &["proto/"])?;

    // Compile registrar service proto (accounts, students, courses, enrollments)
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/registrar.proto"], &["proto/"])?;

    Ok(())
}
