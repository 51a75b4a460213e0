// Build script for blog-service
// Compiles the Post, User and Session protos for gRPC server and client code
// generation. protoc and the well-known type includes come from
// protoc-bin-vendored, so no system installation is needed.
use std::path::PathBuf;

const PROTOS: &[&str] = &[
    "../proto/services/post.proto",
    "../proto/services/user.proto",
    "../proto/services/session.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for proto in PROTOS {
        println!("cargo:rerun-if-changed={proto}");
    }

    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    let includes = [
        PathBuf::from("../proto/services"),
        protoc_bin_vendored::include_path()?,
    ];

    // Clients are used by the end-to-end tests
    tonic_build::configure()
        .compile_well_known_types(false)
        .extern_path(".google.protobuf.Timestamp", "::prost_types::Timestamp")
        .build_server(true)
        .build_client(true)
        .compile_protos(PROTOS, &includes)?;

    Ok(())
}
