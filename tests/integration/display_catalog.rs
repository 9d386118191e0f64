//! Discovery and status snapshot tests.

use dctl::display::{discover, DeviceCategory, Overview};
use dctl::gateway::Gateway;
use dctl::tool::mock::MockTool;

fn gateway() -> Gateway<MockTool> {
    Gateway::new(MockTool::new())
}

const TWO_DISPLAYS: &str = concat!(
    r#"{"tagID":"1","name":"Built-in","deviceType":"Display"},"#,
    r#"{"tagID":"2","name":"Sidecar","deviceType":"VirtualScreen"}"#,
);

#[tokio::test]
async fn discovery_parses_comma_separated_objects() {
    let gw = gateway();
    gw.tool().respond("get -identifiers", TWO_DISPLAYS);

    let displays = discover(&gw).await.unwrap();
    assert_eq!(displays.len(), 2);
    assert_eq!(displays[0].name, "Built-in");
    assert_eq!(displays[1].category, DeviceCategory::VirtualScreen);
}

#[tokio::test]
async fn discovery_of_empty_output_is_an_empty_list() {
    let gw = gateway();
    gw.tool().respond("get -identifiers", "\n");

    let displays = discover(&gw).await.unwrap();
    assert!(displays.is_empty());
}

#[tokio::test]
async fn snapshot_collects_statuses_per_display() {
    let gw = gateway();
    gw.tool().respond("get -identifiers", TWO_DISPLAYS);
    gw.tool().respond("get -tagID=1 -feature=connected", "on\n");
    gw.tool().respond("get -tagID=2 -feature=connected", "off\n");
    gw.tool().respond(
        "get -tagID=1 -feature=displayModeList",
        "3 - 2560x1080 60Hz 8bpc Current\n",
    );

    let displays = discover(&gw).await.unwrap();
    let overview = Overview::load(&gw, &displays).await;

    assert!(overview.is_on("1"));
    assert!(!overview.is_on("2"));
    assert_eq!(overview.resolution("1"), Some("2560x1080"));
    assert_eq!(overview.resolution("2"), None);

    // Mode listings are only requested for displays that are on.
    assert!(!gw
        .tool()
        .joined_calls()
        .iter()
        .any(|c| c == "get -tagID=2 -feature=displayModeList"));
}

#[tokio::test]
async fn one_failing_display_does_not_abort_the_batch() {
    let gw = gateway();
    gw.tool().respond("get -identifiers", TWO_DISPLAYS);
    gw.tool().respond("get -tagID=1 -feature=connected", "on\n");
    gw.tool().respond(
        "get -tagID=1 -feature=displayModeList",
        "3 - 2560x1080 60Hz 8bpc Current\n",
    );
    gw.tool().fail_tag("2");

    let displays = discover(&gw).await.unwrap();
    let overview = Overview::load(&gw, &displays).await;

    // The healthy display's slots are intact; the failed one stays empty.
    assert_eq!(overview.status("1"), Some("on"));
    assert_eq!(overview.status("2"), None);
    assert_eq!(overview.resolution("1"), Some("2560x1080"));
}
