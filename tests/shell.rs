//! End-to-end command sessions through `Shell::handle`.

use trtlshell::core::RedirectMode;
use trtlshell::models::SessionState;
use trtlshell::{Shell, ShellConfig};

/// Drives a shell as one user and records every reply that would be sent.
struct Harness {
    shell: Shell,
    user: &'static str,
    messages: Vec<String>,
}

impl Harness {
    fn new() -> Self {
        Self::as_user("tester")
    }

    fn as_user(user: &'static str) -> Self {
        Self {
            shell: Shell::default(),
            user,
            messages: Vec::new(),
        }
    }

    /// Send a line and return the reply, or `None` if nothing would be sent.
    fn send(&mut self, line: &str) -> Option<String> {
        let (text, should_reply) = self.shell.handle(self.user, line).into_parts();
        if should_reply {
            self.messages.push(text.clone());
            Some(text)
        } else {
            None
        }
    }

    fn login(&mut self) {
        assert_eq!(
            self.send("trtlshell"),
            Some(format!("{} is now logged in.", self.user))
        );
    }
}

#[test]
fn test_ignore_when_anonymous() {
    let mut h = Harness::new();
    h.send("exit");
    h.send("ls");
    h.send("echo hi");
    assert!(h.messages.is_empty());
}

#[test]
fn test_login_logout() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("pwd").as_deref(), Some("/home/tester"));
    assert_eq!(h.send("exit").as_deref(), Some("tester is now logged out."));
    assert_eq!(h.messages.len(), 3);
}

#[test]
fn test_double_login() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(
        h.send("trtlshell").as_deref(),
        Some("tester is already logged in. type 'exit' to quit.")
    );
    assert_eq!(h.shell.active_sessions(), 1);
    let homes = h.shell.with_state(|state| {
        let home = state.fs.child_dir(state.fs.root(), "home").unwrap();
        state.fs.listing(home)
    });
    assert_eq!(homes, vec![".", "..", "tester"]);
}

#[test]
fn test_cd_navigation() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("cd .."), None);
    assert_eq!(h.send("pwd").as_deref(), Some("/home"));
    h.send("cd ..");
    assert_eq!(h.send("pwd").as_deref(), Some("/"));
    h.send("cd ..");
    assert_eq!(h.send("pwd").as_deref(), Some("/"));
    h.send("cd home/tester");
    assert_eq!(h.send("pwd").as_deref(), Some("/home/tester"));
    h.send("cd /");
    assert_eq!(h.send("pwd").as_deref(), Some("/"));
    h.send("cd ~");
    assert_eq!(h.send("pwd").as_deref(), Some("/home/tester"));
}

#[test]
fn test_cd_failures() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(
        h.send("cd not valid arguments").as_deref(),
        Some("really? you don't know how to use cd")
    );
    assert_eq!(h.send("cd").as_deref(), Some("really? you don't know how to use cd"));
    assert_eq!(
        h.send("cd nonexistent").as_deref(),
        Some("'nonexistent' does not exist.")
    );
    // A file is not somewhere you can go
    h.send("touch notes");
    assert_eq!(h.send("cd notes").as_deref(), Some("'notes' does not exist."));
    assert_eq!(h.send("pwd").as_deref(), Some("/home/tester"));
}

#[test]
fn test_cd_to_other_users_home() {
    let shell = Shell::default();
    shell.handle("alice", "trtlshell");
    shell.handle("bob", "trtlshell");
    shell.handle("bob", "mkdir shared");

    assert!(!shell.handle("alice", "cd ~bob/shared").should_reply);
    assert_eq!(shell.handle("alice", "pwd").output, "/home/bob/shared");

    assert_eq!(
        shell.handle("alice", "cd ~mallory").output,
        "'~mallory' does not exist."
    );

    // bob's home outlives bob's session
    shell.handle("bob", "exit");
    assert!(!shell.handle("alice", "cd ~bob").should_reply);
    assert_eq!(shell.handle("alice", "pwd").output, "/home/bob");
}

#[test]
fn test_ls() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("ls").as_deref(), Some(".\n.."));
    h.send("cd ..");
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\ntester"));
    h.send("cd tester");
    assert_eq!(h.send("ls /").as_deref(), Some(".\n..\nhome"));
    assert_eq!(h.send("ls nope").as_deref(), Some("'nope' does not exist."));
    assert_eq!(
        h.send("ls a b").as_deref(),
        Some("really? you don't know how to use ls")
    );
}

#[test]
fn test_ls_is_deterministic() {
    let mut h = Harness::new();
    h.login();
    for name in ["zeta", "alpha", "mid"] {
        h.send(&format!("mkdir {}", name));
        h.send(&format!("touch {}.txt", name));
    }
    let first = h.send("ls").unwrap();
    let second = h.send("ls").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        ".\n..\nalpha\nmid\nzeta\nalpha.txt\nmid.txt\nzeta.txt"
    );
}

#[test]
fn test_mkdir() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("mkdir test"), None);
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\ntest"));
    h.send("mkdir /test");
    assert_eq!(h.send("ls /").as_deref(), Some(".\n..\nhome\ntest"));
    assert_eq!(
        h.send("mkdir").as_deref(),
        Some("really? you don't know how to use mkdir")
    );
}

#[test]
fn test_mkdir_creates_ancestors() {
    let mut h = Harness::new();
    h.login();
    h.send("mkdir a/b/c");
    h.send("cd a/b/c");
    assert_eq!(h.send("pwd").as_deref(), Some("/home/tester/a/b/c"));
}

#[test]
fn test_mkdir_stops_at_file() {
    let mut h = Harness::new();
    h.login();
    h.send("touch blocker");
    assert_eq!(h.send("mkdir keep/../blocker/below"), None);
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\nkeep\nblocker"));
    assert_eq!(h.send("cat blocker").as_deref(), Some(""));
}

#[test]
fn test_touch() {
    let mut h = Harness::new();
    h.login();
    h.send("touch test");
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\ntest"));
    h.send("mkdir folder");
    h.send("touch folder/test2");
    assert_eq!(h.send("ls folder").as_deref(), Some(".\n..\ntest2"));
    h.send("touch /home/tester/folder/test3");
    assert_eq!(h.send("ls folder").as_deref(), Some(".\n..\ntest2\ntest3"));
}

#[test]
fn test_touch_collisions() {
    let mut h = Harness::new();
    h.login();
    h.send("mkdir docs");
    h.send("echo kept > notes");

    assert_eq!(h.send("touch docs").as_deref(), Some("'docs' is a directory."));
    assert_eq!(h.send("touch notes").as_deref(), Some("'notes' already exists."));
    assert_eq!(h.send("cat notes").as_deref(), Some("kept"));
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\ndocs\nnotes"));
}

#[test]
fn test_touch_needs_existing_parent() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(
        h.send("touch missing/file").as_deref(),
        Some("'missing/file' does not exist.")
    );
    assert_eq!(h.send("ls").as_deref(), Some(".\n.."));
    assert_eq!(
        h.send("touch /").as_deref(),
        Some("really? you don't know how to use touch")
    );
}

#[test]
fn test_echo() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("echo test").as_deref(), Some("test"));
    assert_eq!(h.send("echo \"test\"").as_deref(), Some("test"));
    assert_eq!(h.send("echo \" test\"").as_deref(), Some(" test"));
    assert_eq!(h.send("echo   spaced    out  ").as_deref(), Some("spaced out"));
}

#[test]
fn test_cat() {
    let mut h = Harness::new();
    h.login();
    h.send("touch test");
    h.send("touch test2");
    assert_eq!(h.send("cat test").as_deref(), Some(""));
    assert_eq!(h.send("cat test test2").as_deref(), Some("\n"));
    assert_eq!(
        h.send("cat test ghost test2").as_deref(),
        Some("\n'ghost' does not exist or is not a file.\n")
    );
    assert_eq!(
        h.send("cat").as_deref(),
        Some("really? you don't know how to use cat")
    );
}

#[test]
fn test_echo_truncate() {
    let mut h = Harness::new();
    h.login();
    assert_eq!(h.send("echo \"this is a test\" > test"), None);
    assert_eq!(h.send("cat test").as_deref(), Some("this is a test"));
    h.send("echo \"this is a test2\" > test");
    assert_eq!(h.send("cat test").as_deref(), Some("this is a test2"));
}

#[test]
fn test_echo_append() {
    let mut h = Harness::new();
    h.login();
    h.send("echo \"this is a test\" > test");
    h.send("echo \"this is a test2\" >> test");
    assert_eq!(
        h.send("cat test").as_deref(),
        Some("this is a test\nthis is a test2")
    );
    h.send("echo fresh >> other");
    assert_eq!(h.send("cat other").as_deref(), Some("fresh"));
}

#[test]
fn test_cat_append_to_self() {
    let mut h = Harness::new();
    h.login();
    h.send("echo \"this is a test\" > test");
    assert_eq!(h.send("cat test >> test"), None);
    assert_eq!(
        h.send("cat test").as_deref(),
        Some("this is a test\nthis is a test")
    );
}

#[test]
fn test_cat_redirect_errors() {
    let mut h = Harness::new();
    h.login();
    h.send("mkdir docs");
    h.send("echo x > src");

    assert_eq!(
        h.send("cat ghost > out").as_deref(),
        Some("'ghost' does not exist or is not a file.")
    );
    assert_eq!(
        h.send("cat src src > out").as_deref(),
        Some("really? you don't know how to use cat")
    );
    assert_eq!(
        h.send("cat src >").as_deref(),
        Some("really? you don't know how to use cat")
    );
    assert_eq!(h.send("cat src > docs").as_deref(), Some("'docs' is a directory."));
    assert_eq!(
        h.send("cat src > nowhere/out").as_deref(),
        Some("'nowhere/out' does not exist.")
    );
    assert_eq!(h.send("ls").as_deref(), Some(".\n..\ndocs\nsrc"));
}

#[test]
fn test_redirect_absolute_target() {
    let mut h = Harness::new();
    h.login();
    h.send("mkdir /tmp");
    h.send("echo shared > /tmp/board");
    h.send("cd /");
    assert_eq!(h.send("cat tmp/board").as_deref(), Some("shared"));
    assert_eq!(h.send("cat ~/../../tmp/board").as_deref(), Some("shared"));
}

#[test]
fn test_input_is_lowercased() {
    let mut h = Harness::new();
    h.login();
    h.send("MKDIR Docs");
    assert_eq!(h.send("LS").as_deref(), Some(".\n..\ndocs"));
    assert_eq!(h.send("Echo Hello").as_deref(), Some("hello"));
}

#[test]
fn test_date() {
    let mut h = Harness::new();
    h.login();
    let date = h.send("date").unwrap();
    let fields: Vec<&str> = date.split_whitespace().collect();
    assert_eq!(fields.len(), 6, "unexpected date: {date}");
    assert!(fields[5].parse::<i32>().is_ok());
    assert!(fields[4].starts_with('+') || fields[4].starts_with('-'));
}

#[test]
fn test_single_user_walkthrough() {
    let shell = Shell::default();
    let send = |line: &str| shell.handle("alice", line);

    assert_eq!(send("trtlshell").output, "alice is now logged in.");
    assert_eq!(send("pwd").output, "/home/alice");

    send("mkdir docs");
    assert!(send("ls").output.lines().any(|l| l == "docs"));

    send("touch docs/readme");
    assert_eq!(send("cat docs/readme").output, "");

    send("echo \"hi\" > docs/readme");
    assert_eq!(send("cat docs/readme").output, "hi");

    send("cd /");
    assert_eq!(send("pwd").output, "/");

    assert_eq!(send("cd nonexistent").output, "'nonexistent' does not exist.");
}

#[test]
fn test_sessions_are_isolated() {
    let shell = Shell::default();
    shell.handle("alice", "trtlshell");
    shell.handle("bob", "trtlshell");
    shell.handle("alice", "cd /");

    assert_eq!(shell.handle("alice", "pwd").output, "/");
    assert_eq!(shell.handle("bob", "pwd").output, "/home/bob");
    assert_eq!(shell.session_state("carol"), SessionState::Anonymous);
    assert!(!shell.handle("carol", "pwd").should_reply);
}

#[test]
fn test_custom_config() {
    let config = ShellConfig::from_toml_str(
        r#"
        login_trigger = "hello"
        date_format = "%Y"
        "#,
    )
    .unwrap();
    let shell = Shell::new(config);
    assert_eq!(shell.handle("dave", "hello").output, "dave is now logged in.");
    let year = shell.handle("dave", "date").output;
    assert_eq!(year.len(), 4);
    assert_eq!(
        shell.help(),
        "if you have to ask you'll never know (but type 'exit' to escape)"
    );
}

#[test]
fn test_redirect_mode_is_exported() {
    let parsed = trtlshell::core::Redirection::parse("a >> b").unwrap().unwrap();
    assert_eq!(parsed.mode, RedirectMode::Append);
}
