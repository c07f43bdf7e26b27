fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(fast_bitscan)");

    // Decide whether `ulog2` can lean on a native leading-zero count or has to
    // go through the 256-entry lookup table. Refer to src/wide.rs for where
    // this has an effect.
    let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let fast_bitscan = matches!(
        target_arch.as_str(),
        "aarch64" | "arm" | "mips64" | "powerpc64" | "riscv64" | "x86" | "x86_64"
    );
    if fast_bitscan {
        println!("cargo:rustc-cfg=fast_bitscan");
    }
}
