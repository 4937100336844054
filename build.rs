fn main() {
    // esp-hal's memory layout and vector table; host builds don't need it
    if std::env::var("CARGO_CFG_TARGET_ARCH").as_deref() == Ok("riscv32") {
        println!("cargo:rustc-link-arg=-Tlinkall.x");
    }
}
