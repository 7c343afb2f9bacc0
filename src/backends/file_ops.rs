//! File-operation backend
//!
//! In-process versions of the common coreutils file commands. Operands are
//! resolved against the session's current directory and error lines follow
//! the coreutils phrasing, e.g. `rm: cannot remove 'x': No such file or
//! directory`. A command that fails for some operands still reports the
//! output it produced for the others.

use super::{human_size, CommandBackend};
use crate::error::{Error, Result};
use crate::models::parsed_command::is_option;
use crate::models::DispatchResult;
use crate::parser::wildcard;
use crate::platform::resolve_path;
use chrono::{DateTime, Local};
use nix::errno::Errno;
use nix::unistd::{Gid, Group, Uid, User};
use std::fs::{self, File, FileTimes, Metadata, OpenOptions};
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

const SUPPORTED_COMMANDS: &[&str] = &[
    "ls", "mkdir", "rmdir", "rm", "cp", "mv", "cat", "touch", "find", "stat", "head", "tail", "wc",
];

const DEFAULT_LINE_COUNT: usize = 10;

/// Filesystem commands served without spawning a process
#[derive(Debug, Default, Clone, Copy)]
pub struct FileOperations;

impl FileOperations {
    pub fn new() -> Self {
        Self
    }
}

impl CommandBackend for FileOperations {
    fn name(&self) -> &'static str {
        "file_operations"
    }

    fn supported_commands(&self) -> &'static [&'static str] {
        SUPPORTED_COMMANDS
    }

    fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<DispatchResult> {
        debug!("file operation {} {:?} in {}", command, args, cwd.display());
        match command {
            "ls" => ls(args, cwd),
            "mkdir" => mkdir(args, cwd),
            "rmdir" => rmdir(args, cwd),
            "rm" => rm(args, cwd),
            "cp" => cp(args, cwd),
            "mv" => mv(args, cwd),
            "cat" => cat(args, cwd),
            "touch" => touch(args, cwd),
            "find" => find(args, cwd),
            "stat" => stat(args, cwd),
            "head" => head_or_tail("head", args, cwd),
            "tail" => head_or_tail("tail", args, cwd),
            "wc" => wc(args, cwd),
            other => Err(Error::InvalidArgument {
                command: other.to_string(),
                message: "not a file operation".to_string(),
            }),
        }
    }
}

/// Flags and operands of one invocation
struct Operands {
    flags: Vec<String>,
    operands: Vec<String>,
}

impl Operands {
    /// Separate flags from operands; `--` ends flag parsing
    fn parse(args: &[String], cwd: &Path, expand: bool) -> Self {
        let mut flags = Vec::new();
        let mut operands = Vec::new();
        let mut only_operands = false;

        for arg in args {
            if !only_operands && arg == "--" {
                only_operands = true;
            } else if !only_operands && is_option(arg) {
                flags.push(arg.clone());
            } else if expand {
                operands.extend(wildcard::expand(arg, cwd));
            } else {
                operands.push(arg.clone());
            }
        }

        Self { flags, operands }
    }

    /// Whether any short flag cluster contains `letter`
    fn has(&self, letter: char) -> bool {
        self.flags
            .iter()
            .any(|flag| !flag.starts_with("--") && flag[1..].contains(letter))
    }
}

/// Human-readable reason for an I/O failure, without the `(os error N)` tail
fn io_reason(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None => err.to_string(),
    }
}

fn missing(command: &str, message: &str) -> Error {
    Error::MissingOperand {
        command: command.to_string(),
        message: message.to_string(),
    }
}

/// Combine normal output with per-operand error lines
fn finish(output: Vec<String>, errors: Vec<String>) -> DispatchResult {
    let body = output.join("\n");
    with_errors(body, errors)
}

fn with_errors(mut body: String, errors: Vec<String>) -> DispatchResult {
    if errors.is_empty() {
        return DispatchResult::success(body);
    }
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(&errors.join("\n"));
    DispatchResult::error(body)
}

fn ls(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    let show_all = parsed.has('a');
    let long = parsed.has('l');
    let human = parsed.has('h');

    let paths = if parsed.operands.is_empty() {
        vec![".".to_string()]
    } else {
        parsed.operands
    };
    let multiple = paths.len() > 1;

    let mut output = Vec::new();
    let mut errors = Vec::new();

    for raw in &paths {
        let target = resolve_path(cwd, raw);
        let meta = match fs::metadata(&target) {
            Ok(meta) => meta,
            Err(e) => {
                errors.push(format!("ls: cannot access '{}': {}", raw, io_reason(&e)));
                continue;
            }
        };

        if !meta.is_dir() {
            if long {
                output.push(long_entry(&target, raw, human));
            } else {
                output.push(raw.clone());
            }
            continue;
        }

        let entries = match sorted_entries(&target, show_all) {
            Ok(entries) => entries,
            Err(e) => {
                errors.push(format!(
                    "ls: cannot open directory '{}': {}",
                    raw,
                    io_reason(&e)
                ));
                continue;
            }
        };

        if multiple {
            output.push(format!("{}:", raw));
        }
        if long {
            output.extend(
                entries
                    .iter()
                    .map(|name| long_entry(&target.join(name), name, human)),
            );
        } else if !entries.is_empty() {
            output.push(entries.join("  "));
        }
    }

    Ok(finish(output, errors))
}

fn sorted_entries(dir: &Path, show_all: bool) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| show_all || !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

/// One `ls -l` line
fn long_entry(path: &Path, name: &str, human: bool) -> String {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => return format!("ls: cannot access '{}': {}", name, io_reason(&e)),
    };

    let size = if human {
        human_size(meta.len())
    } else {
        meta.len().to_string()
    };
    let modified = meta
        .modified()
        .map(|time| DateTime::<Local>::from(time).format("%b %d %H:%M").to_string())
        .unwrap_or_else(|_| "?".to_string());

    let mut line = format!(
        "{} {:>3} {:<8} {:<8} {:>8} {} {}",
        mode_string(&meta),
        meta.nlink(),
        user_name(meta.uid()),
        group_name(meta.gid()),
        size,
        modified,
        name
    );
    if meta.file_type().is_symlink() {
        if let Ok(link) = fs::read_link(path) {
            line.push_str(&format!(" -> {}", link.display()));
        }
    }
    line
}

/// `drwxr-xr-x` style type and permission string
fn mode_string(meta: &Metadata) -> String {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else {
        '-'
    };

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

fn user_name(uid: u32) -> String {
    User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map(|user| user.name)
        .unwrap_or_else(|| uid.to_string())
}

fn group_name(gid: u32) -> String {
    Group::from_gid(Gid::from_raw(gid))
        .ok()
        .flatten()
        .map(|group| group.name)
        .unwrap_or_else(|| gid.to_string())
}

fn mkdir(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, false);
    if parsed.operands.is_empty() {
        return Err(missing("mkdir", "missing operand"));
    }
    let parents = parsed.has('p');

    let mut errors = Vec::new();
    for raw in &parsed.operands {
        let target = resolve_path(cwd, raw);
        let result = if parents {
            fs::create_dir_all(&target)
        } else {
            fs::create_dir(&target)
        };
        if let Err(e) = result {
            errors.push(format!(
                "mkdir: cannot create directory '{}': {}",
                raw,
                io_reason(&e)
            ));
        }
    }

    Ok(finish(Vec::new(), errors))
}

fn rmdir(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    if parsed.operands.is_empty() {
        return Err(missing("rmdir", "missing operand"));
    }

    let mut errors = Vec::new();
    for raw in &parsed.operands {
        if let Err(e) = fs::remove_dir(resolve_path(cwd, raw)) {
            errors.push(format!("rmdir: failed to remove '{}': {}", raw, io_reason(&e)));
        }
    }

    Ok(finish(Vec::new(), errors))
}

fn rm(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    let recursive = parsed.has('r') || parsed.has('R');
    let force = parsed.has('f');

    if parsed.operands.is_empty() {
        if force {
            return Ok(DispatchResult::empty());
        }
        return Err(missing("rm", "missing operand"));
    }

    let mut errors = Vec::new();
    for raw in &parsed.operands {
        let last = raw.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        if last == "." || last == ".." {
            errors.push(format!(
                "rm: refusing to remove '.' or '..' directory: skipping '{}'",
                raw
            ));
            continue;
        }

        let target = resolve_path(cwd, raw);
        if recursive && target == Path::new("/") {
            errors.push("rm: it is dangerous to operate recursively on '/'".to_string());
            continue;
        }

        let meta = match fs::symlink_metadata(&target) {
            Ok(meta) => meta,
            Err(e) => {
                if !(force && e.kind() == io::ErrorKind::NotFound) {
                    errors.push(format!("rm: cannot remove '{}': {}", raw, io_reason(&e)));
                }
                continue;
            }
        };

        let result = if meta.is_dir() {
            if !recursive {
                errors.push(format!("rm: cannot remove '{}': Is a directory", raw));
                continue;
            }
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };

        if let Err(e) = result {
            errors.push(format!("rm: cannot remove '{}': {}", raw, io_reason(&e)));
        }
    }

    Ok(finish(Vec::new(), errors))
}

/// Split operands into sources and a destination, with coreutils messages
fn sources_and_dest<'a>(
    command: &str,
    operands: &'a [String],
) -> Result<(&'a [String], &'a String)> {
    match operands {
        [] => Err(missing(command, "missing file operand")),
        [only] => Err(missing(
            command,
            &format!("missing destination file operand after '{}'", only),
        )),
        [sources @ .., dest] => Ok((sources, dest)),
    }
}

/// Where `source` lands when copied or moved to `dest`
fn landing_path(source: &Path, raw_source: &str, dest: &Path, into_dir: bool) -> PathBuf {
    if into_dir {
        let name = source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(raw_source));
        dest.join(name)
    } else {
        dest.to_path_buf()
    }
}

fn cp(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    let recursive = parsed.has('r') || parsed.has('R');
    let preserve = parsed.has('p');

    let (sources, dest) = sources_and_dest("cp", &parsed.operands)?;
    let dest_path = resolve_path(cwd, dest);
    let into_dir = dest_path.is_dir();
    if !into_dir && sources.len() > 1 {
        return Err(Error::failed(
            "cp",
            format!("target '{}' is not a directory", dest),
        ));
    }

    let mut errors = Vec::new();
    for raw in sources {
        let source = resolve_path(cwd, raw);
        let meta = match fs::metadata(&source) {
            Ok(meta) => meta,
            Err(e) => {
                errors.push(format!("cp: cannot stat '{}': {}", raw, io_reason(&e)));
                continue;
            }
        };
        let target = landing_path(&source, raw, &dest_path, into_dir);

        if source == target {
            errors.push(format!("cp: '{}' and '{}' are the same file", raw, dest));
            continue;
        }

        let result = if meta.is_dir() {
            if !recursive {
                errors.push(format!("cp: -r not specified; omitting directory '{}'", raw));
                continue;
            }
            if target.starts_with(&source) {
                errors.push(format!(
                    "cp: cannot copy a directory, '{}', into itself, '{}'",
                    raw, dest
                ));
                continue;
            }
            copy_tree(&source, &target, preserve)
        } else {
            copy_file(&source, &target, preserve)
        };

        if let Err(e) = result {
            errors.push(format!("cp: cannot copy '{}': {}", raw, io_reason(&e)));
        }
    }

    Ok(finish(Vec::new(), errors))
}

fn copy_file(source: &Path, target: &Path, preserve: bool) -> io::Result<()> {
    fs::copy(source, target)?;
    if preserve {
        preserve_times(source, target)?;
    }
    Ok(())
}

fn copy_tree(source: &Path, target: &Path, preserve: bool) -> io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let to = target.join(entry.file_name());
        if file_type.is_dir() {
            copy_tree(&entry.path(), &to, preserve)?;
        } else if file_type.is_symlink() {
            std::os::unix::fs::symlink(fs::read_link(entry.path())?, &to)?;
        } else {
            copy_file(&entry.path(), &to, preserve)?;
        }
    }
    if preserve {
        fs::set_permissions(target, fs::metadata(source)?.permissions())?;
    }
    Ok(())
}

fn preserve_times(source: &Path, target: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    File::options().write(true).open(target)?.set_times(times)
}

fn mv(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    let (sources, dest) = sources_and_dest("mv", &parsed.operands)?;
    let dest_path = resolve_path(cwd, dest);
    let into_dir = dest_path.is_dir();
    if !into_dir && sources.len() > 1 {
        return Err(Error::failed(
            "mv",
            format!("target '{}' is not a directory", dest),
        ));
    }

    let mut errors = Vec::new();
    for raw in sources {
        let source = resolve_path(cwd, raw);
        if let Err(e) = fs::symlink_metadata(&source) {
            errors.push(format!("mv: cannot stat '{}': {}", raw, io_reason(&e)));
            continue;
        }
        let target = landing_path(&source, raw, &dest_path, into_dir);
        if source == target {
            errors.push(format!("mv: '{}' and '{}' are the same file", raw, dest));
            continue;
        }

        if let Err(e) = move_path(&source, &target) {
            errors.push(format!(
                "mv: cannot move '{}' to '{}': {}",
                raw,
                dest,
                io_reason(&e)
            ));
        }
    }

    Ok(finish(Vec::new(), errors))
}

/// Rename, falling back to copy-and-delete across filesystems
fn move_path(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Err(e) if e.raw_os_error() == Some(Errno::EXDEV as i32) => {
            if fs::symlink_metadata(source)?.is_dir() {
                copy_tree(source, target, true)?;
                fs::remove_dir_all(source)
            } else {
                copy_file(source, target, true)?;
                fs::remove_file(source)
            }
        }
        other => other,
    }
}

fn cat(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    if parsed.operands.is_empty() {
        return Err(missing("cat", "missing file operand"));
    }

    let mut body = String::new();
    let mut errors = Vec::new();
    for raw in &parsed.operands {
        match fs::read(resolve_path(cwd, raw)) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => body.push_str(&text),
                Err(_) => errors.push(format!("cat: {}: Binary file", raw)),
            },
            Err(e) => errors.push(format!("cat: {}: {}", raw, io_reason(&e))),
        }
    }

    Ok(with_errors(body, errors))
}

fn touch(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    if parsed.operands.is_empty() {
        return Err(missing("touch", "missing file operand"));
    }

    let mut errors = Vec::new();
    for raw in &parsed.operands {
        let target = resolve_path(cwd, raw);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .and_then(|file| file.set_modified(SystemTime::now()));
        if let Err(e) = result {
            errors.push(format!("touch: cannot touch '{}': {}", raw, io_reason(&e)));
        }
    }

    Ok(finish(Vec::new(), errors))
}

/// What `find` looks for
struct FindQuery {
    pattern: Option<String>,
    ignore_case: bool,
    kind: Option<char>,
}

impl FindQuery {
    fn matches(&self, name: &str, is_dir: bool) -> bool {
        match self.kind {
            Some('f') if is_dir => return false,
            Some('d') if !is_dir => return false,
            _ => {}
        }
        match &self.pattern {
            None => true,
            Some(pattern) if self.ignore_case => {
                wildcard::matches(&pattern.to_lowercase(), &name.to_lowercase())
            }
            Some(pattern) => wildcard::matches(pattern, name),
        }
    }
}

/// `find [PATH] [PATTERN] [-name P | -iname P] [-type f|d]`
///
/// A first bare operand containing a wildcard is taken as the pattern and
/// the search starts at `.`.
fn find(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let mut root: Option<String> = None;
    let mut query = FindQuery {
        pattern: None,
        ignore_case: false,
        kind: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-name" | "-iname" => {
                let value = iter
                    .next()
                    .ok_or_else(|| missing("find", &format!("missing argument to `{}'", arg)))?;
                query.ignore_case = arg == "-iname";
                query.pattern = Some(value.clone());
            }
            "-type" => {
                let value = iter
                    .next()
                    .ok_or_else(|| missing("find", "missing argument to `-type'"))?;
                query.kind = match value.as_str() {
                    "f" => Some('f'),
                    "d" => Some('d'),
                    other => {
                        return Err(Error::InvalidArgument {
                            command: "find".to_string(),
                            message: format!("Unknown argument to -type: {}", other),
                        })
                    }
                };
            }
            other if is_option(other) => {
                return Err(Error::InvalidArgument {
                    command: "find".to_string(),
                    message: format!("unknown predicate `{}'", other),
                });
            }
            other => {
                if root.is_none() && query.pattern.is_none() && !wildcard::is_pattern(other) {
                    root = Some(other.to_string());
                } else if query.pattern.is_none() {
                    query.pattern = Some(other.to_string());
                } else {
                    return Err(Error::InvalidArgument {
                        command: "find".to_string(),
                        message: format!("paths must precede expression: `{}'", other),
                    });
                }
            }
        }
    }

    let root = root.unwrap_or_else(|| ".".to_string());
    let root_path = resolve_path(cwd, &root);
    let root_meta = fs::metadata(&root_path)
        .map_err(|e| Error::failed("find", format!("'{}': {}", root, io_reason(&e))))?;

    let mut found = Vec::new();
    let mut errors = Vec::new();

    let root_name = root_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.clone());
    if (query.pattern.is_none() || !root_meta.is_dir())
        && query.matches(&root_name, root_meta.is_dir())
    {
        found.push(root.clone());
    }
    if root_meta.is_dir() {
        walk(&root_path, &root, &query, &mut found, &mut errors);
    }

    found.sort();
    Ok(finish(found, errors))
}

fn walk(
    dir: &Path,
    shown: &str,
    query: &FindQuery,
    found: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("find: '{}': {}", shown, io_reason(&e)));
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let child = if shown.ends_with('/') {
            format!("{}{}", shown, name)
        } else {
            format!("{}/{}", shown, name)
        };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if query.matches(&name, is_dir) {
            found.push(child.clone());
        }
        if is_dir {
            walk(&entry.path(), &child, query, found, errors);
        }
    }
}

fn stat(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    if parsed.operands.is_empty() {
        return Err(missing("stat", "missing operand"));
    }

    let mut output = Vec::new();
    let mut errors = Vec::new();
    for raw in &parsed.operands {
        match fs::symlink_metadata(resolve_path(cwd, raw)) {
            Ok(meta) => output.push(describe(raw, &meta)),
            Err(e) => errors.push(format!("stat: cannot stat '{}': {}", raw, io_reason(&e))),
        }
    }

    Ok(finish(output, errors))
}

fn describe(name: &str, meta: &Metadata) -> String {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        "directory"
    } else if file_type.is_symlink() {
        "symbolic link"
    } else if file_type.is_file() && meta.len() == 0 {
        "regular empty file"
    } else if file_type.is_file() {
        "regular file"
    } else {
        "special file"
    };

    let timestamp = |secs: i64, nanos: i64| {
        DateTime::from_timestamp(secs, nanos as u32)
            .map(|utc| {
                utc.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S%.9f %z")
                    .to_string()
            })
            .unwrap_or_else(|| "-".to_string())
    };

    [
        format!("  File: {}", name),
        format!(
            "  Size: {:<15} Blocks: {:<10} IO Block: {:<6} {}",
            meta.len(),
            meta.blocks(),
            meta.blksize(),
            kind
        ),
        format!(
            "Device: {:<13} Inode: {:<11} Links: {}",
            meta.dev(),
            meta.ino(),
            meta.nlink()
        ),
        format!(
            "Access: ({:04o}/{})  Uid: ({:>5}/{:>8})   Gid: ({:>5}/{:>8})",
            meta.mode() & 0o7777,
            mode_string(meta),
            meta.uid(),
            user_name(meta.uid()),
            meta.gid(),
            group_name(meta.gid())
        ),
        format!("Access: {}", timestamp(meta.atime(), meta.atime_nsec())),
        format!("Modify: {}", timestamp(meta.mtime(), meta.mtime_nsec())),
        format!("Change: {}", timestamp(meta.ctime(), meta.ctime_nsec())),
    ]
    .join("\n")
}

fn parse_count(command: &str, value: &str) -> Result<usize> {
    value.parse::<usize>().map_err(|_| Error::InvalidArgument {
        command: command.to_string(),
        message: format!("invalid number of lines: '{}'", value),
    })
}

/// `head` and `tail`: `-n N`, `-nN` and `-N` select the line count
fn head_or_tail(command: &str, args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let mut count = DEFAULT_LINE_COUNT;
    let mut files = Vec::new();

    let mut index = 0;
    while index < args.len() {
        let arg = &args[index];
        if arg == "-n" {
            let value = args
                .get(index + 1)
                .ok_or_else(|| missing(command, "option requires an argument -- 'n'"))?;
            count = parse_count(command, value)?;
            index += 2;
            continue;
        }

        if let Some(value) = arg.strip_prefix("-n").filter(|v| !v.is_empty()) {
            count = parse_count(command, value)?;
        } else if let Some(digits) = arg
            .strip_prefix('-')
            .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
        {
            count = parse_count(command, digits)?;
        } else if is_option(arg) {
            return Err(Error::InvalidArgument {
                command: command.to_string(),
                message: format!("invalid option -- '{}'", arg.trim_start_matches('-')),
            });
        } else {
            files.extend(wildcard::expand(arg, cwd));
        }
        index += 1;
    }

    if files.is_empty() {
        return Err(missing(command, "missing file operand"));
    }

    let with_headers = files.len() > 1;
    let mut sections = Vec::new();
    let mut errors = Vec::new();

    for raw in &files {
        let text = match fs::read(resolve_path(cwd, raw)) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                errors.push(format!(
                    "{}: cannot open '{}' for reading: {}",
                    command,
                    raw,
                    io_reason(&e)
                ));
                continue;
            }
        };

        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let selected = if command == "head" {
            &lines[..count.min(lines.len())]
        } else {
            &lines[lines.len().saturating_sub(count)..]
        };
        let body = selected.concat();
        let body = body.trim_end_matches('\n');

        if with_headers {
            sections.push(format!("==> {} <==\n{}", raw, body));
        } else {
            sections.push(body.to_string());
        }
    }

    let separator = if with_headers { "\n\n" } else { "\n" };
    Ok(with_errors(sections.join(separator), errors))
}

fn wc(args: &[String], cwd: &Path) -> Result<DispatchResult> {
    let parsed = Operands::parse(args, cwd, true);
    if parsed.operands.is_empty() {
        return Err(missing("wc", "missing file operand"));
    }

    let any_selected = parsed.has('l') || parsed.has('w') || parsed.has('c');
    let show_lines = !any_selected || parsed.has('l');
    let show_words = !any_selected || parsed.has('w');
    let show_bytes = !any_selected || parsed.has('c');

    let format_counts = |counts: [usize; 3], label: &str| {
        let mut parts = Vec::new();
        if show_lines {
            parts.push(counts[0].to_string());
        }
        if show_words {
            parts.push(counts[1].to_string());
        }
        if show_bytes {
            parts.push(counts[2].to_string());
        }
        parts.push(label.to_string());
        parts.join(" ")
    };

    let mut output = Vec::new();
    let mut errors = Vec::new();
    let mut totals = [0usize; 3];

    for raw in &parsed.operands {
        match fs::read(resolve_path(cwd, raw)) {
            Ok(bytes) => {
                let counts = [
                    bytes.iter().filter(|&&b| b == b'\n').count(),
                    String::from_utf8_lossy(&bytes).split_whitespace().count(),
                    bytes.len(),
                ];
                for (total, count) in totals.iter_mut().zip(counts) {
                    *total += count;
                }
                output.push(format_counts(counts, raw));
            }
            Err(e) => errors.push(format!("wc: {}: {}", raw, io_reason(&e))),
        }
    }

    if parsed.operands.len() > 1 {
        output.push(format_counts(totals, "total"));
    }

    Ok(finish(output, errors))
}
