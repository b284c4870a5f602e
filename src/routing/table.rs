//! The embedded WebPageTest route table.
//!
//! Query strings are stored exactly as the client sends them (already
//! percent-encoded) and are compared literally.

use crate::config::schema::RouteConfig;

/// A statically embedded route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRoute {
    pub path: &'static str,
    pub query: &'static str,
    /// `None` replies 404 with an empty body.
    pub fixture: Option<&'static str>,
}

const fn fixture(path: &'static str, query: &'static str, name: &'static str) -> StaticRoute {
    StaticRoute {
        path,
        query,
        fixture: Some(name),
    }
}

const fn absent(path: &'static str, query: &'static str) -> StaticRoute {
    StaticRoute {
        path,
        query,
        fixture: None,
    }
}

impl From<&StaticRoute> for RouteConfig {
    fn from(route: &StaticRoute) -> Self {
        RouteConfig {
            path: route.path.to_string(),
            query: route.query.to_string(),
            fixture: route.fixture.map(str::to_string),
        }
    }
}

pub const DEFAULT_ROUTES: &[StaticRoute] = &[
    fixture("/testStatus.php", "test=120816_V2_2", "testStatus.json"),
    fixture("/xmlResult.php", "test=120816_V2_2", "testResults.xml"),
    fixture("/getLocations.php", "", "locations.xml"),
    fixture("/getTesters.php", "", "testers.xml"),
    fixture(
        "/runtest.php",
        "url=http%3A%2F%2Ftwitter.com%2Fmarcelduran&f=json",
        "runTest.json",
    ),
    fixture(
        "/runtest.php",
        "url=http%3A%2F%2Ftwitter.com%2Fmarcelduran&location=Local_Firefox_Chrome%3AChrome&runs=3&fvonly=1&label=test%20123&pngss=1&timeline=1&netlog=1&f=json",
        "runTest.json",
    ),
    fixture(
        "/runtest.php",
        "script=logData%090%0Anavigate%09http%3A%2F%2Ffoo.com%2Flogin%0A%2F%2F%20log%20some%20data%0AlogData%091%0AsetValue%09name%3Dusername%09johndoe%0AsetValue%09name%3Dpassword%0912345%0AsubmitForm%09action%3Dhttp%3A%2F%2Ffoo.com%2Fmain%0AwaitForComplete&f=json",
        "runTest.json",
    ),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_pagespeed.txt", "pageSpeed.json"),
    fixture("/export.php", "test=120816_V2_2", "har.json"),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_progress.csv", "utilization.csv"),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_IEWTR.txt", "request.txt"),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_timeline.json", "timeline.json"),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_netlog.txt", "netLog.txt"),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_console_log.json", "consoleLog.json"),
    fixture("/getgzip.php", "test=120816_V2_2&file=testinfo.json", "testInfo.json"),
    fixture("/testlog.php", "all=on&f=csv&days=2", "history.csv"),
    fixture("/waterfall.php", "test=120816_V2_2&run=1&cached=0", "waterfall.png"),
    fixture(
        "/thumbnail.php",
        "test=120816_V2_2&run=1&cached=0&file=1_waterfall.png",
        "waterfallThumbnail.png",
    ),
    fixture("/getgzip.php", "test=120816_V2_2&file=1_screen.jpg", "screenshot.jpg"),
    fixture(
        "/thumbnail.php",
        "test=120816_V2_2&file=1_screen.jpg&run=1&cached=0",
        "screenshotThumbnail.jpg",
    ),
    fixture(
        "/getgzip.php",
        "test=120816_V2_2&file=1_screen.png",
        "screenshotFullResolution.png",
    ),
    fixture("/cancelTest.php", "test=120816_V2_2", "cancel.html"),
    fixture("/cancelTest.php", "test=120816_V2_3", "cancelNotCancelled.html"),
    fixture(
        "/video/create.php",
        "tests=130416_YS_KD4-r%3A3-c%3A1%2C130416_W6_KEE-r%3A8-c%3A1&f=json&end=visual",
        "createVideo.json",
    ),
    fixture(
        "/video/view.php",
        "embed=1&id=130416_36ed6e37013655a14b2b857cdccec99db72adcaa",
        "embeddedVideoPlayer.html",
    ),
    // multi-run results, default and custom median metric
    fixture(
        "/xmlResult.php",
        "test=130619_KK_6A2",
        "testResultsMultiRunsDefaultMedianMetric.xml",
    ),
    fixture(
        "/xmlResult.php",
        "test=130619_KK_6A2&medianMetric=TTFB",
        "testResultsMultiRunsTTFBMedianMetric.xml",
    ),
    fixture(
        "/xmlResult.php",
        "test=130724_YD_8JX&breakdown=1&domains=1&pagespeed=1&requests=1",
        "testResultsExtraData.xml",
    ),
    // pingback (sync) runs
    fixture(
        "/runtest.php",
        "url=http%3A%2F%2Ftwitter.com%2Fmarcelduran&f=json&pingback=http%3A%2F%2F127.0.0.1%3A8000%2Ftestdone",
        "runTest.json",
    ),
    fixture(
        "/runtest.php",
        "url=http%3A%2F%2Ftwitter.com%2Fmarcelduran&runs=3&fvonly=1&f=json&pingback=http%3A%2F%2F127.0.0.1%3A8000%2Ftestdone",
        "runTestMultiRuns.json",
    ),
    // not found / invalid
    fixture("/testStatus.php", "test=120816_V2_3", "testStatusNotFound.json"),
    fixture("/xmlResult.php", "test=120816_V2_3", "testResultsNotFound.xml"),
    fixture("/runtest.php", "url=&f=json", "runTestInvalid.json"),
    fixture("/runtest.php", "script=&f=json", "runTestInvalid.json"),
    absent("/getgzip.php", "test=120816_V2_3&file=1_pagespeed.txt"),
    fixture("/export.php", "test=120816_V2_3", "harNotFound.json"),
    fixture("/waterfall.php", "test=120816_V2_3&run=1&cached=0", "waterfallNotFound.png"),
    fixture(
        "/thumbnail.php",
        "test=120816_V2_3&run=1&cached=0&file=1_waterfall.png",
        "waterfallThumbnailNotFound.png",
    ),
    absent("/thumbnail.php", "test=120816_V2_3&file=1_screen.jpg&run=1&cached=0"),
    absent("/cancelTest.php", "test=120816_V2_4"),
    fixture("/runtest.php", "url=http%3A%2F%2Fapikey.com&f=json", "runTestNoAPIKey.json"),
    fixture(
        "/runtest.php",
        "url=http%3A%2F%2Fapikey.com&k=12345&f=json",
        "runTestInvalidAPIKey.json",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = DEFAULT_ROUTES.iter().map(|r| (r.path, r.query)).collect();
        assert_eq!(keys.len(), DEFAULT_ROUTES.len());
    }

    #[test]
    fn test_absent_entries() {
        let absent: Vec<_> = DEFAULT_ROUTES
            .iter()
            .filter(|r| r.fixture.is_none())
            .map(|r| r.path)
            .collect();
        assert_eq!(absent, ["/getgzip.php", "/thumbnail.php", "/cancelTest.php"]);
    }

    #[test]
    fn test_not_found_fixture_is_not_absent() {
        let entry = DEFAULT_ROUTES
            .iter()
            .find(|r| r.path == "/testStatus.php" && r.query == "test=120816_V2_3")
            .unwrap();
        assert_eq!(entry.fixture, Some("testStatusNotFound.json"));
    }
}
