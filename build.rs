use build_target;
use build_target::Os;
use std::env;

// Settings handed to emcc when the module is linked for a web host.
// GLFW comes from the emscripten port, not from glfw-sys.
fn emscripten_link_args() -> Vec<&'static str> {
    let mut args = vec![
        "-sALLOW_MEMORY_GROWTH=1",
        "-sEXPORTED_RUNTIME_METHODS=['ccall','cwrap']",
    ];
    if env::var("CARGO_FEATURE_GLFW_BACKEND").is_ok() {
        args.push("-sUSE_GLFW=3");
        args.push("-sFULL_ES2=1");
    }
    return args;
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    match build_target::target_os().unwrap() {
        Os::Emscripten => {
            for arg in emscripten_link_args() {
                println!("cargo:rustc-link-arg={}", arg);
            }
        },
        Os::Android | Os::iOs => {
            panic!("Mobile builds are unsupported...");
        },
        _ => {
            // Native hosts link GLFW through glfw-sys and need nothing extra.
        }
    }
}
