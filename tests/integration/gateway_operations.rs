//! Gateway tests using the mock tool.

use dctl::config::Settings;
use dctl::error::DctlError;
use dctl::gateway::Gateway;
use dctl::tool::mock::MockTool;

fn gateway() -> Gateway<MockTool> {
    Gateway::new(MockTool::new())
}

#[tokio::test]
async fn toggle_connected_builds_tool_args() {
    let gw = gateway();
    gw.tool().respond("toggle -tagID=42 -feature=connected", "on\n");

    let reply = gw.toggle_connected("42").await.unwrap();
    assert_eq!(reply, "on");
    gw.tool().assert_called("toggle -tagID=42 -feature=connected");
}

#[tokio::test]
async fn pip_toggle_builds_tool_args() {
    let gw = gateway();
    gw.tool().respond("toggle -tagID=42 -feature=pip", "\n");

    let reply = gw.toggle_pip("42").await.unwrap();
    assert_eq!(reply, "");
    gw.tool().assert_called("toggle -tagID=42 -feature=pip");
}

#[tokio::test]
async fn set_mode_passes_mode_number_through() {
    let gw = gateway();
    gw.tool()
        .respond("set -tagID=1 -feature=displayModeNumber -value=20", "ok\n");

    let reply = gw.set_mode("1", "20").await.unwrap();
    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn brightness_increase_near_max_is_clamped() {
    // At 0.98, a 0.05 step must request exactly 1, never 1.03.
    let gw = gateway();
    gw.tool().respond("get -tagID=1 -feature=brightness", "0.98\n");
    gw.tool().respond_default("ok\n");

    let adj = gw.adjust_brightness("1", 0.05).await.unwrap();
    assert!(adj.applied <= 1.0);

    let set_call = requested_value(&gw, "brightness");
    assert!(set_call <= 1.0, "requested {set_call}, expected at most 1.0");
}

#[tokio::test]
async fn contrast_increase_is_clamped_to_0_9() {
    // At 0.87, a 0.05 step must request at most 0.9, never 0.92.
    let gw = gateway();
    gw.tool().respond("get -tagID=1 -feature=contrast", "0.87\n");
    gw.tool().respond_default("ok\n");

    let adj = gw.adjust_contrast("1", 0.05).await.unwrap();
    assert!(adj.applied <= 0.9);

    let set_call = requested_value(&gw, "contrast");
    assert!(set_call <= 0.9, "requested {set_call}, expected at most 0.9");
}

#[tokio::test]
async fn contrast_decrease_is_clamped_to_minus_0_9() {
    let gw = gateway();
    gw.tool().respond("get -tagID=1 -feature=contrast", "-0.87\n");
    gw.tool().respond_default("ok\n");

    let adj = gw.adjust_contrast("1", -0.05).await.unwrap();
    assert!(adj.applied >= -0.9);

    let set_call = requested_value(&gw, "contrast");
    assert!(set_call >= -0.9, "requested {set_call}, expected at least -0.9");
}

#[tokio::test]
async fn configured_increment_drives_the_step() {
    let settings = Settings {
        brightness_increment: Some("0.2".to_string()),
        ..Default::default()
    };

    let gw = gateway();
    gw.tool().respond("get -tagID=1 -feature=brightness", "0.5\n");
    gw.tool().respond_default("ok\n");

    let adj = gw
        .adjust_brightness("1", settings.brightness_increment())
        .await
        .unwrap();
    assert!((adj.applied - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn unparsable_getter_output_fails_loudly() {
    let gw = gateway();
    gw.tool().respond("get -tagID=1 -feature=brightness", "n/a\n");

    let err = gw.brightness("1").await.unwrap_err();
    assert!(matches!(err, DctlError::ValueParse { .. }));
}

#[tokio::test]
async fn process_failure_propagates_and_stops_the_adjustment() {
    let gw = gateway();
    gw.tool()
        .inject_error(DctlError::Other("tool exploded".to_string()));

    let err = gw.adjust_brightness("1", 0.05).await.unwrap_err();
    assert!(err.to_string().contains("tool exploded"));

    // The failed getter must not be followed by a set.
    assert_eq!(gw.tool().call_count(), 1);
}

/// Extract the float from the recorded `set ... -value=<v>` invocation.
fn requested_value(gw: &Gateway<MockTool>, feature: &str) -> f64 {
    let needle = format!("-feature={feature} -value=");
    let call = gw
        .tool()
        .joined_calls()
        .into_iter()
        .find(|c| c.starts_with("set ") && c.contains(&needle))
        .expect("no set invocation recorded");
    let raw = call.split("-value=").nth(1).unwrap().to_string();
    raw.parse().expect("unparsable -value argument")
}
