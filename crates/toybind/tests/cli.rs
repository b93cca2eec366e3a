use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn toybind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toybind"))
        .env("RUST_LOG", "warn")
        .env_remove("TOYBIND_STANDALONE")
        .env_remove("TOYBIND_SCHEME")
        .args(args)
        .output()
        .expect("failed to run toybind")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

const DOCUMENT: &str = r#"
name = "Demo"

[[buffer]]
name = "A"
file = "a.glsl"
uses_self = true
self_channel = 3

[[buffer.texture]]
channel = 0
local_texture = "wood.png"
mag = "Nearest"
min = "Linear"
wrap = "Clamp"
mag_line = 2

[[buffer]]
name = "Image"
file = "image.glsl"
uses_keyboard = true

[[buffer.texture]]
channel = 0
buffer_index = 0
"#;

#[test]
fn tokens_json_reports_lines_and_ranges() {
    let temp = TempDir::new().unwrap();
    let shader = temp.path().join("a.glsl");
    fs::write(&shader, "#iChannel0 \"file://wood.png\"\nfloat x = 1.5;\n").unwrap();

    let output = toybind(&["tokens", "--json", path_arg(&shader)]);
    assert!(output.status.success(), "{output:?}");

    let tokens: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(tokens[0]["kind"], "preprocessor_keyword");
    assert_eq!(tokens[0]["value"], "iChannel0");
    assert_eq!(tokens[0]["line"], 0);
    assert_eq!(tokens[1]["kind"], "string");
    assert_eq!(tokens[1]["value"], "file://wood.png");

    let number = tokens
        .iter()
        .find(|token| token["kind"] == "float")
        .expect("a float token");
    assert_eq!(number["value"], 1.5);
    assert_eq!(number["line"], 1);
}

#[test]
fn directives_json_lists_channel_bindings() {
    let temp = TempDir::new().unwrap();
    let shader = temp.path().join("image.glsl");
    fs::write(
        &shader,
        "#include \"common.glsl\"\n#iKeyboard\n#iChannel2 \"self\"\nvoid main() {}\n",
    )
    .unwrap();

    let output = toybind(&["directives", "--json", path_arg(&shader)]);
    assert!(output.status.success(), "{output:?}");

    let directives: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(directives.len(), 3);
    assert_eq!(directives[0]["keyword"], "include");
    assert_eq!(directives[0]["argument"], "common.glsl");
    assert_eq!(directives[1]["keyword"], "iKeyboard");
    assert_eq!(directives[1]["argument"], Value::Null);
    assert_eq!(directives[2]["line"], 2);
}

#[test]
fn resolve_json_describes_every_buffer() {
    let temp = TempDir::new().unwrap();
    let document = temp.path().join("shader.toml");
    fs::write(&document, DOCUMENT).unwrap();

    let output = toybind(&["resolve", "--json", "--standalone", path_arg(&document)]);
    assert!(output.status.success(), "{output:?}");

    let resolution: Value = serde_json::from_slice(&output.stdout).unwrap();
    let buffers = resolution["buffers"].as_array().unwrap();
    assert_eq!(buffers.len(), 2);

    let first = buffers[0]["ops"].as_array().unwrap();
    assert_eq!(first[0]["op"], "file");
    assert_eq!(first[0]["location"]["path"], "wood.png");
    assert_eq!(first[0]["sampler"]["mag"], "Nearest");
    assert_eq!(first[0]["sampler"]["wrap"], "ClampToEdge");
    assert_eq!(first[1]["op"], "self_feedback");
    assert_eq!(first[1]["channel"], 3);

    let image = buffers[1]["ops"].as_array().unwrap();
    assert_eq!(image[0]["op"], "buffer_ref");
    assert_eq!(image[0]["source"], 0);
    assert_eq!(image[1]["op"], "keyboard");
    assert_eq!(image[1]["texture"]["width"], 256);
    assert_eq!(image[1]["texture"]["height"], 3);

    assert!(resolution["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn measured_non_power_of_two_texture_warns() {
    let temp = TempDir::new().unwrap();
    image::RgbaImage::new(100, 50)
        .save(temp.path().join("wood.png"))
        .unwrap();
    let document = temp.path().join("shader.toml");
    fs::write(&document, DOCUMENT).unwrap();

    let output = toybind(&["resolve", "--probe", path_arg(&document)]);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("a.glsl:3: warning: Texture is not power of two"),
        "{stderr}"
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("loaded buffer 0 channel 0: 100x50"), "{stdout}");
}

#[test]
fn broken_cube_map_fails_the_run() {
    let temp = TempDir::new().unwrap();
    let document = temp.path().join("shader.toml");
    fs::write(
        &document,
        r#"
[[buffer]]
name = "Image"
file = "image.glsl"

[[buffer.texture]]
channel = 1
local_texture = "sky_{}.png"
type = "CubeMap"
type_line = 5
"#,
    )
    .unwrap();

    let output = toybind(&["resolve", path_arg(&document)]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("image.glsl:6: error: Could not find all cubemap files"),
        "{stderr}"
    );
}

#[test]
fn validation_issues_are_logged_and_resolution_continues() {
    let temp = TempDir::new().unwrap();
    image::RgbaImage::new(100, 50)
        .save(temp.path().join("wood.png"))
        .unwrap();
    image::RgbaImage::new(64, 64)
        .save(temp.path().join("square.png"))
        .unwrap();
    let document = temp.path().join("shader.toml");
    fs::write(
        &document,
        r#"
[[buffer]]
name = "A"
file = "a.glsl"

[[buffer.texture]]
channel = 0
local_texture = "wood.png"
mag = "Linear"
min = "Linear"
wrap = "Repeat"
wrap_line = 4

[[buffer.texture]]
channel = 0
local_texture = "square.png"
mag = "Nearest"
min = "Nearest"
wrap = "Clamp"
wrap_line = 9
"#,
    )
    .unwrap();

    let output = toybind(&["resolve", "--probe", "--standalone", path_arg(&document)]);
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("buffer 'A' binds channel 0 more than once"),
        "{stderr}"
    );
    assert!(!stderr.contains("not power of two"), "{stderr}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("iChannel0 <- file wood.png"), "{stdout}");
    assert!(stdout.contains("iChannel0 <- file square.png"), "{stdout}");
    assert!(stdout.contains("loaded buffer 0 channel 0: 64x64"), "{stdout}");
}
