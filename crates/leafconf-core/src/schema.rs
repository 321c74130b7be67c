//! Static schema of the Leaf configuration language
//!
//! Every keyword family is a plain enum implementing [`Keyword`]. The
//! string table lives in one exhaustive `as_str` match per enum and parsing
//! is derived from the `ALL` list, so dispatch on a keyword can never drift
//! from the table that lists it.

/// A closed family of keywords
pub trait Keyword: Copy + Eq + Sized + 'static {
    /// Every member, in documentation order
    const ALL: &'static [Self];

    /// Source spelling
    fn as_str(self) -> &'static str;

    /// Short description for hover and completion
    fn description(self) -> &'static str;

    /// Look up a keyword by its exact spelling
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Spellings of every member
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }
}

/// Join keyword spellings as `a", "b", "c` for use inside quoted messages
pub fn quoted_list(names: &[&str]) -> String {
    names.join("\", \"")
}

// ==================== SECTIONS ====================

/// Known section names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    General,
    Proxy,
    ProxyGroup,
    Rule,
    Host,
    Env,
    OnDemand,
}

impl Keyword for SectionName {
    const ALL: &'static [Self] = &[
        Self::General,
        Self::Proxy,
        Self::ProxyGroup,
        Self::Rule,
        Self::Host,
        Self::Env,
        Self::OnDemand,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Proxy => "Proxy",
            Self::ProxyGroup => "Proxy Group",
            Self::Rule => "Rule",
            Self::Host => "Host",
            Self::Env => "Env",
            Self::OnDemand => "On Demand",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::General => "Global settings: inbounds, DNS and logging.",
            Self::Proxy => "Outbound proxies, one `name = protocol, ...` per line.",
            Self::ProxyGroup => "Groups combining proxies or other groups into one actor.",
            Self::Rule => "Routing rules, matched top to bottom. Ends with a FINAL rule.",
            Self::Host => "Static host name to IP address mappings.",
            Self::Env => "Environment variables passed to the Leaf core.",
            Self::OnDemand => "On-demand connection rules for the VPN platform.",
        }
    }
}

// ==================== GENERAL ====================

/// Value domain of a `[General]` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Signed integer
    Integer,
    /// Only `auto` has an effect
    Tun,
    /// One of [`LOG_LEVELS`]
    LogLevel,
    /// Comma-separated IP addresses
    IpList,
    /// Comma-separated domains, mutually exclusive with its counterpart
    DomainList,
    /// `true` / `false`
    BoolLike,
    /// TCP/UDP port
    Port,
    /// Network interface or listen address
    Interface,
    /// Free-form
    Opaque,
}

/// Keys accepted in `[General]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    TunFd,
    Tun,
    LogLevel,
    LogOutput,
    DnsServer,
    DnsInterface,
    AlwaysRealIp,
    AlwaysFakeIp,
    RoutingDomainResolve,
    HttpInterface,
    Interface,
    HttpPort,
    Port,
    SocksInterface,
    SocksPort,
    ApiInterface,
    ApiPort,
}

impl SettingKey {
    pub fn kind(self) -> SettingKind {
        match self {
            Self::TunFd => SettingKind::Integer,
            Self::Tun => SettingKind::Tun,
            Self::LogLevel => SettingKind::LogLevel,
            Self::LogOutput => SettingKind::Opaque,
            Self::DnsServer => SettingKind::IpList,
            Self::AlwaysRealIp | Self::AlwaysFakeIp => SettingKind::DomainList,
            Self::RoutingDomainResolve => SettingKind::BoolLike,
            Self::DnsInterface
            | Self::HttpInterface
            | Self::Interface
            | Self::SocksInterface
            | Self::ApiInterface => SettingKind::Interface,
            Self::HttpPort | Self::Port | Self::SocksPort | Self::ApiPort => SettingKind::Port,
        }
    }
}

impl Keyword for SettingKey {
    const ALL: &'static [Self] = &[
        Self::TunFd,
        Self::Tun,
        Self::LogLevel,
        Self::LogOutput,
        Self::DnsServer,
        Self::DnsInterface,
        Self::AlwaysRealIp,
        Self::AlwaysFakeIp,
        Self::RoutingDomainResolve,
        Self::HttpInterface,
        Self::Interface,
        Self::HttpPort,
        Self::Port,
        Self::SocksInterface,
        Self::SocksPort,
        Self::ApiInterface,
        Self::ApiPort,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::TunFd => "tun-fd",
            Self::Tun => "tun",
            Self::LogLevel => "loglevel",
            Self::LogOutput => "logoutput",
            Self::DnsServer => "dns-server",
            Self::DnsInterface => "dns-interface",
            Self::AlwaysRealIp => "always-real-ip",
            Self::AlwaysFakeIp => "always-fake-ip",
            Self::RoutingDomainResolve => "routing-domain-resolve",
            Self::HttpInterface => "http-interface",
            Self::Interface => "interface",
            Self::HttpPort => "http-port",
            Self::Port => "port",
            Self::SocksInterface => "socks-interface",
            Self::SocksPort => "socks-port",
            Self::ApiInterface => "api-interface",
            Self::ApiPort => "api-port",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::TunFd => {
                "File descriptor of an existing TUN device. Kept for compatibility; prefer `tun = auto`."
            }
            Self::Tun => "TUN inbound. `auto` uses the VPN interface provided by the platform.",
            Self::LogLevel => "Logging verbosity: trace, debug, info, warn or error.",
            Self::LogOutput => "Where logs are written: `console` or a file path.",
            Self::DnsServer => "Comma-separated IP addresses of upstream DNS servers.",
            Self::DnsInterface => "Interface or address used to send DNS queries.",
            Self::AlwaysRealIp => "Domains that always resolve to real IP addresses in fake-IP mode.",
            Self::AlwaysFakeIp => "Domains that always resolve to fake IP addresses; all others get real ones.",
            Self::RoutingDomainResolve => {
                "Resolve domain names before routing so that IP based rules can match."
            }
            Self::HttpInterface => "Listen address of the HTTP inbound.",
            Self::Interface => "Listen address of the default inbound.",
            Self::HttpPort => "Listen port of the HTTP inbound.",
            Self::Port => "Listen port of the default inbound.",
            Self::SocksInterface => "Listen address of the SOCKS inbound.",
            Self::SocksPort => "Listen port of the SOCKS inbound.",
            Self::ApiInterface => "Listen address of the control API.",
            Self::ApiPort => "Listen port of the control API.",
        }
    }
}

/// Accepted `loglevel` values
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// ==================== PROXY ====================

/// Outbound protocols accepted in `[Proxy]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Direct,
    Reject,
    Drop,
    Redirect,
    Socks,
    Shadowsocks,
    Trojan,
    Vmess,
}

const TRANSPORT_KEYS: &[ProxyProperty] = &[
    ProxyProperty::Ws,
    ProxyProperty::WsPath,
    ProxyProperty::WsHost,
    ProxyProperty::Tls,
    ProxyProperty::Sni,
    ProxyProperty::TlsCert,
    ProxyProperty::Amux,
    ProxyProperty::AmuxMax,
    ProxyProperty::AmuxCon,
    ProxyProperty::Quic,
    ProxyProperty::Interface,
];

impl Protocol {
    /// Whether the declaration carries `host, port` after the protocol
    pub fn requires_host(self) -> bool {
        !matches!(self, Self::Direct | Self::Reject | Self::Drop)
    }

    pub fn required_keys(self) -> &'static [ProxyProperty] {
        match self {
            Self::Shadowsocks => &[ProxyProperty::EncryptMethod, ProxyProperty::Password],
            Self::Trojan => &[ProxyProperty::Password],
            Self::Vmess => &[ProxyProperty::Username, ProxyProperty::EncryptMethod],
            Self::Direct | Self::Reject | Self::Drop | Self::Redirect | Self::Socks => &[],
        }
    }

    pub fn allowed_keys(self) -> &'static [ProxyProperty] {
        match self {
            Self::Direct | Self::Redirect | Self::Shadowsocks => &[ProxyProperty::Interface],
            Self::Reject | Self::Drop => &[],
            Self::Socks => &[
                ProxyProperty::Username,
                ProxyProperty::Password,
                ProxyProperty::Interface,
            ],
            Self::Trojan | Self::Vmess => TRANSPORT_KEYS,
        }
    }

    /// Whether `key` may appear in a declaration of this protocol
    pub fn accepts(self, key: ProxyProperty) -> bool {
        self.required_keys().contains(&key) || self.allowed_keys().contains(&key)
    }

    /// Snippet inserted when completing the whole declaration value
    pub fn snippet(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Reject => "reject",
            Self::Drop => "drop",
            Self::Redirect => "redirect, ${1:host}, ${2:port}",
            Self::Socks => "socks, ${1:host}, ${2:port}",
            Self::Shadowsocks => {
                "shadowsocks, ${1:host}, ${2:port}, encrypt-method=${3:chacha20-ietf-poly1305}, password=${4:password}"
            }
            Self::Trojan => "trojan, ${1:host}, ${2:port}, password=${3:password}",
            Self::Vmess => {
                "vmess, ${1:host}, ${2:port}, username=${3:uuid}, encrypt-method=${4:chacha20-poly1305}"
            }
        }
    }
}

impl Keyword for Protocol {
    const ALL: &'static [Self] = &[
        Self::Direct,
        Self::Reject,
        Self::Drop,
        Self::Redirect,
        Self::Socks,
        Self::Shadowsocks,
        Self::Trojan,
        Self::Vmess,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Reject => "reject",
            Self::Drop => "drop",
            Self::Redirect => "redirect",
            Self::Socks => "socks",
            Self::Shadowsocks => "shadowsocks",
            Self::Trojan => "trojan",
            Self::Vmess => "vmess",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Direct => "Connect to the destination directly.",
            Self::Reject => "Reject the connection.",
            Self::Drop => "Silently drop the connection.",
            Self::Redirect => "Forward every connection to a fixed host and port.",
            Self::Socks => "SOCKS5 proxy.",
            Self::Shadowsocks => "Shadowsocks proxy with an AEAD cipher.",
            Self::Trojan => "Trojan proxy, optionally over WebSocket, TLS, AMux or QUIC.",
            Self::Vmess => "VMess proxy, optionally over WebSocket, TLS, AMux or QUIC.",
        }
    }
}

/// Value domain of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// One of [`AEAD_CIPHERS`]
    Cipher,
    /// One of [`GROUP_METHODS`]
    GroupMethod,
    /// `true` / `false`
    BoolLike,
    /// Signed integer
    Integer,
    /// Name of a proxy or proxy group
    Actor,
    /// Free-form
    Opaque,
}

/// Property keys of `[Proxy]` declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyProperty {
    EncryptMethod,
    Password,
    Username,
    Ws,
    WsPath,
    WsHost,
    Tls,
    Sni,
    TlsCert,
    Amux,
    AmuxMax,
    AmuxCon,
    Quic,
    Interface,
}

impl ProxyProperty {
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::EncryptMethod => ValueKind::Cipher,
            Self::Ws | Self::Tls | Self::Amux | Self::Quic => ValueKind::BoolLike,
            Self::AmuxMax | Self::AmuxCon => ValueKind::Integer,
            Self::Password
            | Self::Username
            | Self::WsPath
            | Self::WsHost
            | Self::Sni
            | Self::TlsCert
            | Self::Interface => ValueKind::Opaque,
        }
    }
}

impl Keyword for ProxyProperty {
    const ALL: &'static [Self] = &[
        Self::EncryptMethod,
        Self::Password,
        Self::Username,
        Self::Ws,
        Self::WsPath,
        Self::WsHost,
        Self::Tls,
        Self::Sni,
        Self::TlsCert,
        Self::Amux,
        Self::AmuxMax,
        Self::AmuxCon,
        Self::Quic,
        Self::Interface,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::EncryptMethod => "encrypt-method",
            Self::Password => "password",
            Self::Username => "username",
            Self::Ws => "ws",
            Self::WsPath => "ws-path",
            Self::WsHost => "ws-host",
            Self::Tls => "tls",
            Self::Sni => "sni",
            Self::TlsCert => "tls-cert",
            Self::Amux => "amux",
            Self::AmuxMax => "amux-max",
            Self::AmuxCon => "amux-con",
            Self::Quic => "quic",
            Self::Interface => "interface",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::EncryptMethod => "AEAD cipher used to encrypt the traffic.",
            Self::Password => "Password or pre-shared key.",
            Self::Username => "User name, or the user UUID for VMess.",
            Self::Ws => "Carry the traffic over WebSocket.",
            Self::WsPath => "Request path of the WebSocket upgrade.",
            Self::WsHost => "Host header of the WebSocket upgrade.",
            Self::Tls => "Wrap the connection in TLS.",
            Self::Sni => "Server name sent in the TLS handshake.",
            Self::TlsCert => "Path of a certificate trusted for this server.",
            Self::Amux => "Multiplex streams over shared connections.",
            Self::AmuxMax => "Maximum number of multiplexed connections.",
            Self::AmuxCon => "Maximum number of streams per connection.",
            Self::Quic => "Carry the traffic over QUIC.",
            Self::Interface => "Interface or local address outgoing connections bind to.",
        }
    }
}

/// Ciphers accepted by `encrypt-method`
pub const AEAD_CIPHERS: &[&str] = &[
    "chacha20-poly1305",
    "chacha20-ietf-poly1305",
    "aes-128-gcm",
    "aes-256-gcm",
    "xchacha20-poly1305",
    "xchacha20-ietf-poly1305",
];

// ==================== PROXY GROUP ====================

/// Group types accepted in `[Proxy Group]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupType {
    Chain,
    Failover,
    UrlTest,
    TryAll,
    Static,
    Select,
}

/// Group type removed from Leaf, recognised to point at its replacement
pub const REMOVED_RANDOM_GROUP: &str = "random";

const FAILOVER_KEYS: &[GroupProperty] = &[
    GroupProperty::Failover,
    GroupProperty::CheckInterval,
    GroupProperty::FailTimeout,
    GroupProperty::HealthCheck,
    GroupProperty::LastResort,
    GroupProperty::FallbackCache,
    GroupProperty::CacheSize,
    GroupProperty::CacheTimeout,
    GroupProperty::HealthCheckTimeout,
    GroupProperty::HealthCheckDelay,
    GroupProperty::HealthCheckActive,
    GroupProperty::DelayBase,
];

impl GroupType {
    pub fn required_keys(self) -> &'static [GroupProperty] {
        &[]
    }

    pub fn allowed_keys(self) -> &'static [GroupProperty] {
        match self {
            Self::Chain | Self::Select => &[],
            Self::Failover | Self::UrlTest => FAILOVER_KEYS,
            Self::TryAll => &[GroupProperty::DelayBase],
            Self::Static => &[GroupProperty::Method],
        }
    }

    pub fn accepts(self, key: GroupProperty) -> bool {
        self.required_keys().contains(&key) || self.allowed_keys().contains(&key)
    }

    pub fn snippet(self) -> &'static str {
        match self {
            Self::Chain => "chain, ${1:actor}",
            Self::Failover => "failover, ${1:actor}",
            Self::UrlTest => "url-test, ${1:actor}",
            Self::TryAll => "tryall, ${1:actor}",
            Self::Static => "static, ${1:actor}, method=${2|random,random-once,rr|}",
            Self::Select => "select, ${1:actor}",
        }
    }
}

impl Keyword for GroupType {
    const ALL: &'static [Self] = &[
        Self::Chain,
        Self::Failover,
        Self::UrlTest,
        Self::TryAll,
        Self::Static,
        Self::Select,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Failover => "failover",
            Self::UrlTest => "url-test",
            Self::TryAll => "tryall",
            Self::Static => "static",
            Self::Select => "select",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Chain => "Chain the actors: traffic passes through each of them in order.",
            Self::Failover => "Use the first healthy actor, checking health periodically.",
            Self::UrlTest => "Use the actor with the lowest latency. Same as `failover` with `failover=false`.",
            Self::TryAll => "Try all actors concurrently and keep the first that connects.",
            Self::Static => "Pick an actor with a fixed method: random, random-once or round robin.",
            Self::Select => "Let the user pick one of the actors.",
        }
    }
}

/// Property keys of `[Proxy Group]` declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupProperty {
    Failover,
    CheckInterval,
    FailTimeout,
    HealthCheck,
    LastResort,
    FallbackCache,
    CacheSize,
    CacheTimeout,
    HealthCheckTimeout,
    HealthCheckDelay,
    HealthCheckActive,
    DelayBase,
    Method,
}

impl GroupProperty {
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::Failover | Self::HealthCheck | Self::FallbackCache => ValueKind::BoolLike,
            Self::CheckInterval
            | Self::FailTimeout
            | Self::CacheSize
            | Self::CacheTimeout
            | Self::HealthCheckTimeout
            | Self::HealthCheckDelay
            | Self::HealthCheckActive
            | Self::DelayBase => ValueKind::Integer,
            Self::LastResort => ValueKind::Actor,
            Self::Method => ValueKind::GroupMethod,
        }
    }
}

impl Keyword for GroupProperty {
    const ALL: &'static [Self] = &[
        Self::Failover,
        Self::CheckInterval,
        Self::FailTimeout,
        Self::HealthCheck,
        Self::LastResort,
        Self::FallbackCache,
        Self::CacheSize,
        Self::CacheTimeout,
        Self::HealthCheckTimeout,
        Self::HealthCheckDelay,
        Self::HealthCheckActive,
        Self::DelayBase,
        Self::Method,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Failover => "failover",
            Self::CheckInterval => "check-interval",
            Self::FailTimeout => "fail-timeout",
            Self::HealthCheck => "health-check",
            Self::LastResort => "last-resort",
            Self::FallbackCache => "fallback-cache",
            Self::CacheSize => "cache-size",
            Self::CacheTimeout => "cache-timeout",
            Self::HealthCheckTimeout => "health-check-timeout",
            Self::HealthCheckDelay => "health-check-delay",
            Self::HealthCheckActive => "health-check-active",
            Self::DelayBase => "delay-base",
            Self::Method => "method",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Failover => "Switch to the next actor when the current one fails.",
            Self::CheckInterval => "Seconds between two health checks.",
            Self::FailTimeout => "Seconds before a connection attempt counts as failed.",
            Self::HealthCheck => "Check the health of actors periodically.",
            Self::LastResort => "Actor used when every other actor is unhealthy.",
            Self::FallbackCache => "Remember the actor that last succeeded for each destination.",
            Self::CacheSize => "Number of destinations kept in the fallback cache.",
            Self::CacheTimeout => "Minutes before a fallback cache entry expires.",
            Self::HealthCheckTimeout => "Seconds before a health check counts as failed.",
            Self::HealthCheckDelay => "Milliseconds to wait before the first health check.",
            Self::HealthCheckActive => "Seconds of inactivity after which health checks pause.",
            Self::DelayBase => "Milliseconds to wait before trying the next actor.",
            Self::Method => "Selection method: random, random-once or rr (round robin).",
        }
    }
}

/// Methods accepted by the `method` group property
pub const GROUP_METHODS: &[&str] = &["random", "random-once", "rr"];

// ==================== RULE ====================

/// Rule types accepted in `[Rule]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    IpCidr,
    Domain,
    DomainSuffix,
    DomainKeyword,
    GeoIp,
    External,
    PortRange,
    Network,
    InboundTag,
    Final,
}

impl RuleType {
    /// Number of arguments after the rule type
    pub fn arity(self) -> usize {
        match self {
            Self::Final => 1,
            _ => 2,
        }
    }

    /// Index of the target actor in the comma-separated rule line
    pub fn target_index(self) -> usize {
        self.arity()
    }
}

impl Keyword for RuleType {
    const ALL: &'static [Self] = &[
        Self::IpCidr,
        Self::Domain,
        Self::DomainSuffix,
        Self::DomainKeyword,
        Self::GeoIp,
        Self::External,
        Self::PortRange,
        Self::Network,
        Self::InboundTag,
        Self::Final,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::IpCidr => "IP-CIDR",
            Self::Domain => "DOMAIN",
            Self::DomainSuffix => "DOMAIN-SUFFIX",
            Self::DomainKeyword => "DOMAIN-KEYWORD",
            Self::GeoIp => "GEOIP",
            Self::External => "EXTERNAL",
            Self::PortRange => "PORT-RANGE",
            Self::Network => "NETWORK",
            Self::InboundTag => "INBOUND-TAG",
            Self::Final => "FINAL",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::IpCidr => "Match destination IP addresses inside a CIDR block.",
            Self::Domain => "Match a destination domain exactly.",
            Self::DomainSuffix => "Match a destination domain and all of its subdomains.",
            Self::DomainKeyword => "Match destination domains containing a keyword.",
            Self::GeoIp => "Match destination IP addresses by country code.",
            Self::External => "Match against an external database: `mmdb:<code>` or `site:[<file>:]<group>`.",
            Self::PortRange => "Match destination ports inside `<start>-<end>`.",
            Self::Network => "Match the transport: TCP or UDP.",
            Self::InboundTag => "Match the tag of the inbound that accepted the connection.",
            Self::Final => "Catch-all rule applied when nothing else matches.",
        }
    }
}

/// Values accepted by `NETWORK` rules
pub const NETWORKS: &[&str] = &["TCP", "UDP"];

/// Databases of `EXTERNAL` rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalSource {
    Site,
    Mmdb,
}

impl Keyword for ExternalSource {
    const ALL: &'static [Self] = &[Self::Site, Self::Mmdb];

    fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Mmdb => "mmdb",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Site => "Domain lists from a site database.",
            Self::Mmdb => "Country database in MaxMind format.",
        }
    }
}

/// Values that were probably meant as `true` in a bool-like setting
pub const TRUTHY_SYNONYMS: &[&str] = &["true", "on", "yes", "1", "enable", "enabled", "allow"];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_consistent<K: Keyword + std::fmt::Debug>() {
        for k in K::ALL {
            assert_eq!(K::parse(k.as_str()), Some(*k));
            assert!(!k.description().is_empty(), "{:?} has no description", k);
        }
        let names = K::names();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_tables_consistent() {
        assert_table_consistent::<SectionName>();
        assert_table_consistent::<SettingKey>();
        assert_table_consistent::<Protocol>();
        assert_table_consistent::<ProxyProperty>();
        assert_table_consistent::<GroupType>();
        assert_table_consistent::<GroupProperty>();
        assert_table_consistent::<RuleType>();
        assert_table_consistent::<ExternalSource>();
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(SectionName::parse("Proxy Group"), Some(SectionName::ProxyGroup));
        assert_eq!(SectionName::parse("proxy group"), None);
        assert_eq!(RuleType::parse("final"), None);
    }

    #[test]
    fn test_protocols_requiring_host() {
        assert!(!Protocol::Direct.requires_host());
        assert!(!Protocol::Reject.requires_host());
        assert!(!Protocol::Drop.requires_host());
        assert!(Protocol::Shadowsocks.requires_host());
        assert!(Protocol::Vmess.requires_host());
    }

    #[test]
    fn test_shadowsocks_keys() {
        assert!(Protocol::Shadowsocks.accepts(ProxyProperty::Password));
        assert!(Protocol::Shadowsocks.accepts(ProxyProperty::EncryptMethod));
        assert!(!Protocol::Shadowsocks.accepts(ProxyProperty::Ws));
    }

    #[test]
    fn test_required_keys_are_not_repeated_in_allowed() {
        for p in Protocol::ALL {
            for key in p.required_keys() {
                assert!(!p.allowed_keys().contains(key));
            }
        }
    }

    #[test]
    fn test_group_keys() {
        assert!(GroupType::Static.accepts(GroupProperty::Method));
        assert!(!GroupType::Select.accepts(GroupProperty::Method));
        assert!(GroupType::UrlTest.accepts(GroupProperty::LastResort));
    }

    #[test]
    fn test_rule_arity() {
        assert_eq!(RuleType::Final.arity(), 1);
        assert_eq!(RuleType::Domain.arity(), 2);
        assert_eq!(RuleType::Final.target_index(), 1);
        assert_eq!(RuleType::Network.target_index(), 2);
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&["a", "b"]), "a\", \"b");
    }
}
