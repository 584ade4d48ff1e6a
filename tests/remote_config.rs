//! Startup configuration contract for the remote engine.
//!
//! Kept as a single test in its own binary because it mutates the process
//! environment.

use network_diag::config::{ENV_AGENT_ACCESS_TOKEN, ENV_AGENT_RESOURCE_NAME, ENV_LOCATION};
use network_diag::RemoteEngine;

#[test]
fn test_missing_variables_are_named_in_order() {
    for var in [ENV_LOCATION, ENV_AGENT_RESOURCE_NAME, ENV_AGENT_ACCESS_TOKEN] {
        std::env::remove_var(var);
    }

    // Each missing variable is reported by name as it is encountered
    let err = RemoteEngine::from_env().unwrap_err();
    assert!(err.to_string().contains(ENV_LOCATION));

    std::env::set_var(ENV_LOCATION, "us-central1");
    let err = RemoteEngine::from_env().unwrap_err();
    assert!(err.to_string().contains(ENV_AGENT_RESOURCE_NAME));

    std::env::set_var(
        ENV_AGENT_RESOURCE_NAME,
        "projects/p/locations/l/reasoningEngines/42",
    );
    let err = RemoteEngine::from_env().unwrap_err();
    assert!(err.to_string().contains(ENV_AGENT_ACCESS_TOKEN));

    std::env::set_var(ENV_AGENT_ACCESS_TOKEN, "token");
    assert!(RemoteEngine::from_env().is_ok());
}
