//! Dictionary of common subdomain labels used for brute-force enumeration.

use super::aggregator::CandidateMap;
use super::entities::RootDomain;

/// Common subdomain labels, grouped by purpose.
pub const COMMON_SUBDOMAINS: &[&str] = &[
    // Core infrastructure
    "www", "mail", "smtp", "imap", "pop", "pop3", "mx", "email", "webmail",
    "api", "app", "web", "ftp", "sftp", "ssh",
    // Environments
    "dev", "staging", "stage", "test", "testing", "qa", "uat", "sandbox",
    "beta", "alpha", "demo", "preview", "canary", "pre-prod", "preprod",
    "prod", "production", "live",
    // Admin panels
    "admin", "administrator", "panel", "cpanel", "whm", "webmin", "manage",
    "manager", "console", "portal", "dashboard", "backoffice", "cms",
    // Cloud & CDN
    "cdn", "assets", "static", "media", "images", "img", "files", "upload",
    "downloads", "dl", "s3", "storage", "cache", "edge",
    // Services
    "blog", "shop", "store", "forum", "community", "wiki", "docs",
    "documentation", "help", "support", "kb", "faq", "status", "health",
    "monitor", "monitoring", "metrics", "analytics",
    // Auth & security
    "auth", "login", "sso", "oauth", "id", "identity", "accounts", "account",
    "secure", "vpn", "gateway", "proxy", "waf",
    // Networking
    "ns1", "ns2", "ns3", "ns4", "dns", "dns1", "dns2",
    "m", "mobile", "wap",
    // Collaboration
    "chat", "slack", "teams", "meet", "conference", "video", "voip",
    "sip", "pbx", "call",
    // DevOps
    "git", "gitlab", "github", "bitbucket", "svn", "repo",
    "jenkins", "ci", "cd", "build", "deploy", "release",
    "docker", "k8s", "kubernetes", "registry", "harbor",
    // Monitoring & logging
    "grafana", "kibana", "elastic", "elasticsearch", "logstash",
    "prometheus", "nagios", "zabbix", "splunk", "sentry", "newrelic",
    "datadog", "pagerduty", "logs", "log",
    // Databases
    "db", "database", "mysql", "postgres", "postgresql", "mongo", "mongodb",
    "redis", "memcached", "sql", "mssql", "oracle",
    // Messaging
    "rabbitmq", "kafka", "mq", "queue", "amqp", "nats",
    // Regional
    "us", "eu", "ap", "us-east", "us-west", "eu-west",
    // Business services
    "crm", "erp", "hr", "finance", "billing", "pay", "payment", "payments",
    "checkout", "cart", "orders", "booking", "reserve",
    "search", "solr", "sphinx",
    "report", "reports", "reporting",
    "internal", "intranet", "extranet", "corp", "corporate",
    "news", "press", "events", "calendar",
    "jobs", "careers", "talent",
    "partners", "affiliate", "reseller", "vendor",
    "feedback", "survey", "forms", "contact",
    "remote", "workspace", "office",
    "backup", "bak", "dr", "failover",
    "www2", "www3", "web1", "web2", "app1", "app2",
    "api2", "api-v2", "v2", "v1", "old", "new", "legacy",
];

/// Expands `labels` under `root`, skipping hostnames already found passively.
///
/// Output follows dictionary order.
pub fn brute_force_candidates<L: AsRef<str>>(
    labels: &[L],
    root: &RootDomain,
    passive: &CandidateMap,
) -> Vec<String> {
    labels
        .iter()
        .map(|label| root.child(label.as_ref()))
        .filter(|host| !passive.contains(host))
        .collect()
}
