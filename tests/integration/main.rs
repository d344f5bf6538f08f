//! Integration tests for shaderbuild

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn shaderbuild() -> Command {
        cargo_bin_cmd!("shaderbuild")
    }

    /// Lay out a minimal shader project in `temp`
    fn write_project(temp: &TempDir, shader_name: &str, shader_body: &str) {
        std::fs::write(
            temp.path().join("shaders.toml"),
            r#"
            [project]
            name = "demo"
            sources = ["Shaders"]
            output_dir = "build"
            "#,
        )
        .unwrap();
        let shaders = temp.path().join("Shaders");
        std::fs::create_dir_all(&shaders).unwrap();
        std::fs::write(shaders.join(shader_name), shader_body).unwrap();
    }

    #[test]
    fn help_displays() {
        shaderbuild()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("HLSL shader build driver"));
    }

    #[test]
    fn version_displays() {
        shaderbuild()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("shaderbuild"));
    }

    #[test]
    fn build_without_manifest_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        shaderbuild()
            .current_dir(temp.path())
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Manifest not found"))
            .stderr(predicate::str::contains("shaderbuild init"));
    }

    #[test]
    fn init_creates_manifest() {
        let temp = TempDir::new().unwrap();
        shaderbuild()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success();
        assert!(temp.path().join("shaders.toml").exists());
    }

    #[test]
    fn init_refuses_existing_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("shaders.toml"), "").unwrap();
        shaderbuild()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn deps_lists_resolved_headers() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.ps.hlsl", "#include \"common.hlsli\"\n");
        std::fs::write(temp.path().join("Shaders/common.hlsli"), "").unwrap();

        shaderbuild()
            .current_dir(temp.path())
            .arg("deps")
            .assert()
            .success()
            .stdout(predicate::str::contains("common.hlsli"));
    }

    #[test]
    fn deps_json_output() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.ps.hlsl", "#include \"common.hlsli\"\n");
        std::fs::write(temp.path().join("Shaders/common.hlsli"), "").unwrap();

        shaderbuild()
            .current_dir(temp.path())
            .args(["deps", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Foo.ps.hlsl"))
            .stdout(predicate::str::contains("common.hlsli"));
    }

    #[test]
    fn deps_ignores_unresolved_includes() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.ps.hlsl", "#include \"missing.hlsli\"\n");

        shaderbuild()
            .current_dir(temp.path())
            .arg("deps")
            .assert()
            .success()
            .stdout(predicate::str::contains("missing.hlsli").not());
    }

    #[test]
    fn clean_without_output_succeeds() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.ps.hlsl", "");

        shaderbuild()
            .current_dir(temp.path())
            .arg("clean")
            .assert()
            .success();
    }
}

#[cfg(unix)]
mod build_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn shaderbuild() -> Command {
        cargo_bin_cmd!("shaderbuild")
    }

    /// Install a stub dxc on a private search path. The stub touches
    /// the file named by -Fo and exits with `exit_code`.
    fn install_stub_dxc(temp: &TempDir, exit_code: i32) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = temp.path().join("stub-bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = format!(
            "#!/bin/sh\n\
             out=\"\"\n\
             while [ $# -gt 1 ]; do\n\
                 if [ \"$1\" = \"-Fo\" ]; then out=\"$2\"; fi\n\
                 shift\n\
             done\n\
             if [ -n \"$out\" ]; then : > \"$out\"; fi\n\
             exit {exit_code}\n"
        );
        let dxc = bin.join("dxc");
        std::fs::write(&dxc, script).unwrap();
        std::fs::set_permissions(&dxc, std::fs::Permissions::from_mode(0o755)).unwrap();
        bin
    }

    fn write_project(temp: &TempDir, shader_name: &str, shader_body: &str) {
        std::fs::write(
            temp.path().join("shaders.toml"),
            r#"
            [project]
            name = "demo"
            sources = ["Shaders"]
            output_dir = "build"
            "#,
        )
        .unwrap();
        let shaders = temp.path().join("Shaders");
        std::fs::create_dir_all(&shaders).unwrap();
        std::fs::write(shaders.join(shader_name), shader_body).unwrap();
    }

    #[test]
    fn build_compiles_shader_with_stub_compiler() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.cs.hlsl", "// compute shader\n");
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success()
            .stdout(predicate::str::contains("1 compiled"));

        assert!(temp.path().join("build/shaders/Foo.sbin").exists());
    }

    #[test]
    fn rebuild_skips_up_to_date_shader() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.cs.hlsl", "// compute shader\n");
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success();

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success()
            .stdout(predicate::str::contains("0 compiled"))
            .stdout(predicate::str::contains("1 up to date"));
    }

    #[test]
    fn forced_rebuild_recompiles() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.cs.hlsl", "// compute shader\n");
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success();

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .args(["build", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 compiled"));
    }

    #[test]
    fn build_fails_when_compiler_is_missing() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.cs.hlsl", "");
        let empty = temp.path().join("empty-bin");
        std::fs::create_dir_all(&empty).unwrap();

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &empty)
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Shader compiler not found"));
    }

    #[test]
    fn build_surfaces_compiler_exit_code() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.ps.hlsl", "");
        let stub = install_stub_dxc(&temp, 3);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Shader compilation failed"))
            .stderr(predicate::str::contains("demo"));
    }

    #[test]
    fn build_rejects_unknown_stage_suffix() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "NoStage.hlsl", "");
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown shader stage"));
    }

    #[test]
    fn clean_removes_compiled_artifacts() {
        let temp = TempDir::new().unwrap();
        write_project(&temp, "Foo.cs.hlsl", "");
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success();
        assert!(temp.path().join("build/shaders/Foo.sbin").exists());

        shaderbuild()
            .current_dir(temp.path())
            .arg("clean")
            .assert()
            .success();
        assert!(!temp.path().join("build/shaders").exists());
    }

    #[test]
    fn build_copies_assets_newer_wins() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("shaders.toml"),
            r#"
            [project]
            name = "demo"
            sources = ["Shaders"]
            output_dir = "build"

            [[assets]]
            source = "Assets"
            dest = "build/assets"
            "#,
        )
        .unwrap();
        std::fs::create_dir_all(temp.path().join("Shaders")).unwrap();
        std::fs::create_dir_all(temp.path().join("Assets")).unwrap();
        std::fs::write(temp.path().join("Assets/cube.obj"), "v 0 0 0").unwrap();
        let stub = install_stub_dxc(&temp, 0);

        shaderbuild()
            .current_dir(temp.path())
            .env("PATH", &stub)
            .arg("build")
            .assert()
            .success();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("build/assets/cube.obj")).unwrap(),
            "v 0 0 0"
        );
    }
}
