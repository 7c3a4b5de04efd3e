use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn sdkb() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sdkb"))
}

fn leftover_staging(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("temp-builder-folder-")
        })
        .count()
}

#[test]
fn test_help_command() {
    sdkb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("signed .wgt widget"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    sdkb().arg("--bogus").assert().failure();
}

#[test]
fn test_missing_project_fails_without_leaking_staging() {
    let work = tempfile::tempdir().unwrap();
    sdkb()
        .current_dir(work.path())
        .args(["-i", "/does/not/exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("-i <PATH> must be provided"));

    assert_eq!(leftover_staging(work.path()), 0);
}

#[test]
fn test_display_profiles_with_workspace_substitution() {
    let ws = tempfile::tempdir().unwrap();
    fs::write(ws.path().join("p.xml"), "<profiles><profile name=\"default\"/></profiles>").unwrap();

    sdkb()
        .arg("-w")
        .arg(ws.path())
        .args(["-p", "!WORKSPACE!/p.xml", "-P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your profiles.xml file:"))
        .stdout(predicate::str::contains("<profile name=\"default\"/>"));
}

#[test]
fn test_display_profiles_uses_default_workspace_location() {
    let ws = tempfile::tempdir().unwrap();
    let sign_dir = ws.path().join(".metadata/.plugins/org.tizen.common.sign");
    fs::create_dir_all(&sign_dir).unwrap();
    fs::write(sign_dir.join("profiles.xml"), "<profiles/>").unwrap();

    sdkb()
        .arg("-w")
        .arg(ws.path())
        .arg("-P")
        .assert()
        .success()
        .stdout(predicate::str::contains("<profiles/>"));
}

#[test]
fn test_display_profiles_missing_file_fails() {
    let ws = tempfile::tempdir().unwrap();
    sdkb()
        .arg("-w")
        .arg(ws.path())
        .arg("-P")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profiles file not found"));
}

#[test]
fn test_explicit_missing_config_file_fails() {
    sdkb()
        .args(["--config", "/no/such/file.toml", "-P"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[cfg(unix)]
mod with_stub_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Writing an executable while another test forks can fail with ETXTBSY.
    static SERIAL: Mutex<()> = Mutex::new(());

    /// Writes `out.wgt` into the directory given as its last argument.
    const PACKAGER_OK: &str = r#"for last; do :; done
echo "$@" > "$last/../packager-args"
find "$last" -name '*.jar' > "$last/../jars-seen"
printf 'widget' > "$last/out.wgt"
"#;

    const PACKAGER_NO_WIDGET: &str = "exit 0\n";

    const PACKAGER_FAILS: &str = r#"for last; do :; done
printf 'widget' > "$last/out.wgt"
exit 3
"#;

    struct Env {
        root: TempDir,
        project: PathBuf,
        out: PathBuf,
    }

    impl Env {
        fn new(files: &[(&str, &str)]) -> Self {
            let root = tempfile::tempdir().unwrap();
            let project = root.path().join("my project");
            let out = root.path().join("out");
            for (rel, content) in files {
                let path = project.join(rel);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            fs::create_dir_all(&project).unwrap();
            Self { root, project, out }
        }

        fn script(&self, name: &str, body: &str) -> PathBuf {
            let path = self.root.path().join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn sdkb(&self, packager: &Path) -> Command {
            let mut cmd = sdkb();
            cmd.current_dir(self.root.path())
                .arg("-i")
                .arg(&self.project)
                .arg("-O")
                .arg(&self.out)
                .arg("-t")
                .arg(packager);
            cmd
        }
    }

    #[test]
    fn test_happy_path_places_widget_twice() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[
            ("index.html", "<html></html>"),
            ("app.js", "var a = 1;"),
            ("lib/caph/x.js", "var x = 2;"),
        ]);
        let packager = env.script("tizen-stub", PACKAGER_OK);

        env.sdkb(&packager).args(["-n", "default"]).assert().success();

        assert_eq!(fs::read(env.out.join("out.wgt")).unwrap(), b"widget");
        assert_eq!(fs::read(env.project.join("out.wgt")).unwrap(), b"widget");
        assert_eq!(
            fs::read_to_string(env.project.join("app.js")).unwrap(),
            "var a = 1;"
        );
        assert_eq!(leftover_staging(env.root.path()), 0);

        let args = fs::read_to_string(env.root.path().join("packager-args")).unwrap();
        assert!(args.starts_with("package -t wgt -s default -- /"));
        assert!(args.contains("temp-builder-folder-"));
    }

    #[test]
    fn test_jar_files_are_not_staged() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[("index.html", "<html></html>"), ("native.jar", "PK")]);
        let packager = env.script("tizen-stub", PACKAGER_OK);

        env.sdkb(&packager).assert().success();

        let jars = fs::read_to_string(env.root.path().join("jars-seen")).unwrap();
        assert!(jars.trim().is_empty());
    }

    #[test]
    fn test_obfuscation_routes_only_eligible_scripts() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[
            ("a.js", "var a = 1;"),
            ("b.min.js", "var b=2;"),
            ("lib/caph/c.js", "var c = 3;"),
            ("d.js", "var d = 4;"),
        ]);
        let log = env.root.path().join("minifier-log");
        let minifier = env.script(
            "minify-stub",
            &format!(
                "basename \"$1\" >> '{}'\nprintf 'minified' > \"$3\"\n",
                log.display()
            ),
        );
        let packager = env.script("tizen-stub", PACKAGER_OK);

        env.sdkb(&packager)
            .arg("-o")
            .arg("--minifier")
            .arg(&minifier)
            .assert()
            .success();

        let mut seen: Vec<String> = fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["a.js", "d.js"]);
        assert_eq!(leftover_staging(env.root.path()), 0);
    }

    #[test]
    fn test_packager_without_widget_fails() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[("index.html", "<html></html>")]);
        let packager = env.script("tizen-stub", PACKAGER_NO_WIDGET);

        env.sdkb(&packager)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("App Package was not created"));

        assert_eq!(leftover_staging(env.root.path()), 0);
        assert!(!env.out.join("out.wgt").exists());
    }

    #[test]
    fn test_packager_non_zero_exit_fails() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[("index.html", "<html></html>")]);
        let packager = env.script("tizen-stub", PACKAGER_FAILS);

        env.sdkb(&packager)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Tizen packager exited with"));

        assert_eq!(leftover_staging(env.root.path()), 0);
        assert!(!env.project.join("out.wgt").exists());
    }

    #[test]
    fn test_missing_packager_executable_fails() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[("index.html", "<html></html>")]);

        env.sdkb(&env.root.path().join("no-such-tizen"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to execute tizen cli"));

        assert_eq!(leftover_staging(env.root.path()), 0);
    }

    #[test]
    fn test_verbose_mode_reports_progress() {
        let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let env = Env::new(&[("index.html", "<html></html>")]);
        let packager = env.script("tizen-stub", PACKAGER_OK);

        env.sdkb(&packager)
            .arg("-V")
            .assert()
            .success()
            .stdout(predicate::str::contains("Copying project folder"))
            .stdout(predicate::str::contains("Build completed"));
    }
}
