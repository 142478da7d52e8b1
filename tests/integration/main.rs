//! Integration tests for jrobo

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn jrobo() -> Command {
        Command::cargo_bin("jrobo").unwrap()
    }

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Suite + codeception files for an installation root; the driver
    /// table carries every OS family so the tests pass on any host
    fn write_driver_config(root: &Path, browser: &str, extra_suite: &str, table_browser: &str) {
        write(
            &root.join("tests").join("acceptance.suite.yml"),
            &format!(
                "modules:\n  config:\n    JoomlaBrowser:\n      browser: '{browser}'\n{extra_suite}"
            ),
        );
        write(
            &root.join("codeception.yml"),
            &format!(
                "webdrivers:\n  {table_browser}:\n    linux: /usr/bin/testdriver\n    mac: /usr/bin/testdriver\n    windows: /usr/bin/testdriver\n"
            ),
        );
    }

    #[test]
    fn help_displays() {
        jrobo()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("browser-test provisioning"));
    }

    #[test]
    fn version_displays() {
        jrobo()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("jrobo"));
    }

    #[test]
    fn get_webdriver_prints_flag() {
        let temp = TempDir::new().unwrap();
        write_driver_config(temp.path(), "chrome", "", "chrome");

        jrobo()
            .current_dir(temp.path())
            .arg("get-webdriver")
            .assert()
            .success()
            .stdout("-Dwebdriver.chrome.driver=/usr/bin/testdriver\n");
    }

    #[test]
    fn get_webdriver_unknown_browser_exits_one() {
        let temp = TempDir::new().unwrap();
        write_driver_config(temp.path(), "safari", "", "chrome");

        jrobo()
            .current_dir(temp.path())
            .arg("get-webdriver")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No driver mapping"));
    }

    #[test]
    fn get_webdriver_missing_path_exits_one() {
        let temp = TempDir::new().unwrap();
        write_driver_config(temp.path(), "chrome", "", "firefox");

        jrobo()
            .current_dir(temp.path())
            .arg("get-webdriver")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No driver path"))
            .stderr(predicate::str::contains("acceptance.suite.yml"));
    }

    #[test]
    fn get_webdriver_edge_insiders_uses_insiders_row() {
        let temp = TempDir::new().unwrap();
        write_driver_config(
            temp.path(),
            "MicrosoftEdge",
            "    AcceptanceHelper:\n      MicrosoftEdgeInsiders: true\n",
            "MicrosoftEdgeInsiders",
        );

        jrobo()
            .current_dir(temp.path())
            .arg("get-webdriver")
            .assert()
            .success()
            .stdout("-Dwebdriver.edge.driver=/usr/bin/testdriver\n");
    }

    #[test]
    fn create_testing_site_excludes_top_level_only() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(&root.join("index.php"), "<?php\n");
        write(&root.join("components").join("com_content").join("content.php"), "c");
        write(&root.join("components").join("tests").join("nested.php"), "nested");
        write(&root.join("tests").join("acceptance.suite.yml"), "suite");
        write(&root.join("tests-phpunit").join("bootstrap.php"), "unit");
        write(&root.join(".git").join("HEAD"), "ref");
        write(&root.join(".github").join("workflow.yml"), "ci");

        jrobo()
            .current_dir(root)
            .arg("create-testing-site")
            .assert()
            .success();

        let site = root.join("tests").join("joomla-cms");
        assert!(site.join("index.php").exists());
        assert!(site.join("components").join("com_content").join("content.php").exists());
        // exclusion is top-level only; nested tests dirs are copied
        assert!(site.join("components").join("tests").join("nested.php").exists());
        assert!(!site.join("tests").exists());
        assert!(!site.join("tests-phpunit").exists());
        assert!(!site.join(".git").exists());
        assert!(!site.join(".github").exists());
    }

    #[test]
    fn create_testing_site_replaces_stale_site() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(&root.join("index.php"), "fresh");
        write(
            &root.join("tests").join("joomla-cms").join("stale.php"),
            "old",
        );

        jrobo()
            .current_dir(root)
            .arg("create-testing-site")
            .assert()
            .success();

        let site = root.join("tests").join("joomla-cms");
        assert!(site.join("index.php").exists());
        assert!(!site.join("stale.php").exists());
    }

    #[test]
    fn create_testing_site_activates_htaccess() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(&root.join("index.php"), "<?php\n");
        write(
            &root.join("htaccess.txt"),
            "Options +FollowSymlinks\n# RewriteBase /\n",
        );

        jrobo()
            .current_dir(root)
            .args(["create-testing-site", "--use-htaccess"])
            .assert()
            .success();

        let htaccess = root
            .join("tests")
            .join("joomla-cms")
            .join(".htaccess");
        let content = std::fs::read_to_string(htaccess).unwrap();
        assert!(content.contains("RewriteBase joomla-cms/"));
        assert!(!content.contains("# RewriteBase /"));
    }

    #[test]
    fn create_testing_site_honors_configured_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let custom_parent = temp.path().join("custom");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&custom_parent).unwrap();

        write(&root.join("index.php"), "<?php\n");
        write(
            &root.join("jrobo.ini"),
            &format!("cmsPath = {}\n", custom_parent.join("site").display()),
        );

        jrobo()
            .current_dir(&root)
            .arg("create-testing-site")
            .assert()
            .success();

        assert!(custom_parent.join("site").join("index.php").exists());
        assert!(!root.join("tests").join("joomla-cms").exists());
    }

    #[test]
    fn create_testing_site_falls_back_when_parent_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(&root.join("index.php"), "<?php\n");
        write(
            &root.join("jrobo.ini"),
            &format!(
                "cmsPath = {}\n",
                root.join("no-such-parent").join("site").display()
            ),
        );

        jrobo()
            .current_dir(root)
            .arg("create-testing-site")
            .assert()
            .success();

        assert!(root.join("tests").join("joomla-cms").join("index.php").exists());
    }

    #[test]
    fn get_webdriver_without_suite_file_exits_one() {
        let temp = TempDir::new().unwrap();

        jrobo()
            .current_dir(temp.path())
            .arg("get-webdriver")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("suite configuration"));
    }
}
