fn main() {
    // Compile Slint UI files
    slint_build::compile("ui/main.slint").unwrap();

    // Embed Windows resources (version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "VcpTune");
        res.set("FileDescription", "Monitor VCP control front-end");
        res.set("CompanyName", "VcpTune Contributors");
        res.set("OriginalFilename", "vcptune.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
