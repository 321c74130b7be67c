//! Stable diagnostic codes
//!
//! `LC0xx` section structure, `LC1xx` `[General]`, `LC2xx` `[Proxy]` and
//! actor names, `LC3xx` `[Proxy Group]`, `LC4xx` `[Rule]`, `LC5xx` `[Host]`,
//! `LC6xx` `[Env]`, `LC8xx` typed values shared by all sections.

// Sections
pub const CONTENT_OUTSIDE_SECTION: &str = "LC001";
pub const TRAILING_HEADER_CONTENT: &str = "LC002";
pub const UNKNOWN_SECTION: &str = "LC003";
pub const DUPLICATE_SECTION: &str = "LC004";

// General
pub const GENERAL_EXPECTED_EQUALS: &str = "LC101";
pub const DUPLICATE_SETTING: &str = "LC102";
pub const UNKNOWN_SETTING: &str = "LC103";
pub const TUN_FD_NOTE: &str = "LC104";
pub const TUN_NOT_AUTO: &str = "LC105";
pub const INVALID_LOG_LEVEL: &str = "LC106";
pub const FAKE_IP_CONFLICT: &str = "LC107";

// Proxy and actor names
pub const ACTOR_EXPECTED_EQUALS: &str = "LC201";
pub const DUPLICATE_PROXY: &str = "LC202";
pub const PROXY_CONFLICTS_WITH_GROUP: &str = "LC203";
pub const DUPLICATE_GROUP: &str = "LC204";
pub const GROUP_CONFLICTS_WITH_PROXY: &str = "LC205";
pub const EXPECTED_PROTOCOL: &str = "LC210";
pub const UNKNOWN_PROTOCOL: &str = "LC211";
pub const PROXY_EXPECTED_PAIR: &str = "LC212";
pub const PROXY_DUPLICATE_KEY: &str = "LC213";
pub const PROXY_UNKNOWN_KEY: &str = "LC214";
pub const PROXY_KEY_NOT_ALLOWED: &str = "LC215";
pub const PROXY_MISSING_KEY: &str = "LC216";
pub const EXPECTED_HOST: &str = "LC217";
pub const EXPECTED_PORT: &str = "LC218";
pub const UNEXPECTED_ARGUMENT: &str = "LC219";
pub const UNKNOWN_CIPHER: &str = "LC220";

// Proxy Group
pub const EXPECTED_GROUP_TYPE: &str = "LC301";
pub const REMOVED_GROUP_TYPE: &str = "LC302";
pub const UNKNOWN_GROUP_TYPE: &str = "LC303";
pub const URL_TEST_FAILOVER: &str = "LC304";
pub const UNKNOWN_METHOD: &str = "LC305";
pub const NO_ACTORS: &str = "LC306";
pub const EMPTY_ACTOR: &str = "LC307";
pub const UNRESOLVED_ACTOR: &str = "LC308";
pub const UNRESOLVED_LAST_RESORT: &str = "LC309";
pub const GROUP_EXPECTED_PAIR: &str = "LC310";
pub const GROUP_DUPLICATE_KEY: &str = "LC311";
pub const GROUP_UNKNOWN_KEY: &str = "LC312";
pub const GROUP_KEY_NOT_ALLOWED: &str = "LC313";
pub const GROUP_MISSING_KEY: &str = "LC314";

// Rule
pub const FINAL_ARITY: &str = "LC401";
pub const MULTIPLE_FINAL: &str = "LC402";
pub const RULE_ARITY: &str = "LC403";
pub const UNKNOWN_RULE_TYPE: &str = "LC404";
pub const INVALID_CIDR: &str = "LC405";
pub const EMPTY_MATCHER: &str = "LC406";
pub const EXTERNAL_SPACES: &str = "LC407";
pub const INVALID_EXTERNAL: &str = "LC408";
pub const INVALID_PORT_RANGE: &str = "LC409";
pub const UNKNOWN_NETWORK: &str = "LC410";
pub const UNDEFINED_RULE_TARGET: &str = "LC411";
pub const MISSING_FINAL: &str = "LC412";

// Host
pub const HOST_EXPECTED_EQUALS: &str = "LC501";
pub const DUPLICATE_HOST: &str = "LC502";

// Env
pub const ENV_EXPECTED_EQUALS: &str = "LC601";
pub const ENV_EMPTY_NAME: &str = "LC602";

// Typed values
pub const INVALID_PORT: &str = "LC801";
pub const PORT_OUT_OF_RANGE: &str = "LC802";
pub const NOT_A_BOOL: &str = "LC803";
pub const NOT_AN_INTEGER: &str = "LC804";
pub const INVALID_IP: &str = "LC805";
