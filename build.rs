fn main() {
    // Only run winres on Windows targets
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "mbseq-transposer");
        res.set("FileDescription", "MicroBrute sequence transposer");
        match res.compile() {
            Ok(_) => println!("cargo:warning=winres: version info embedded"),
            Err(e) => println!("cargo:warning=winres failed: {}", e),
        }
    }
}
