use serde::{Deserialize, Serialize};

/// Placement rule matched against a newly mapped window.
/// `None` patterns match anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// 0 keeps the monitor's current view
    #[serde(default)]
    pub tags: u32,
    #[serde(default)]
    pub floating: bool,
    /// -1 keeps the selected monitor
    #[serde(default = "default_monitor")]
    pub monitor: i32,
}

fn default_monitor() -> i32 {
    -1
}

impl Rule {
    pub fn class(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            monitor: -1,
            ..Default::default()
        }
    }

    pub fn with_instance(mut self, instance: &str) -> Self {
        self.instance = Some(instance.to_string());
        self
    }

    pub fn with_tags(mut self, tags: u32) -> Self {
        self.tags = tags;
        self
    }

    pub fn floating(mut self) -> Self {
        self.floating = true;
        self
    }

    pub fn on_monitor(mut self, monitor: i32) -> Self {
        self.monitor = monitor;
        self
    }

    fn matches(&self, class: Option<&str>, instance: Option<&str>, title: &str) -> bool {
        fn field(pattern: &Option<String>, value: Option<&str>) -> bool {
            match pattern {
                None => true,
                Some(p) => value == Some(p.as_str()),
            }
        }
        field(&self.class, class)
            && field(&self.instance, instance)
            && field(&self.title, Some(title))
    }
}

/// Outcome of matching a window against the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tags: u32,
    pub is_floating: bool,
    pub monitor: i32,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            tags: 0,
            is_floating: false,
            monitor: -1,
        }
    }
}

/// Ordered rule table; the first matching rule decides.
#[derive(Debug, Clone, Default)]
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        for rule in &rules {
            tracing::debug!(
                "Rule: class={:?} instance={:?} title={:?} -> tags={} floating={} monitor={}",
                rule.class,
                rule.instance,
                rule.title,
                rule.tags,
                rule.floating,
                rule.monitor
            );
        }
        Self { rules }
    }

    pub fn classify(
        &self,
        class: Option<&str>,
        instance: Option<&str>,
        title: &str,
    ) -> Classification {
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.matches(class, instance, title))
        else {
            return Classification::default();
        };

        tracing::info!(
            "Rule matched class={:?} instance={:?}: tags={} floating={} monitor={}",
            class,
            instance,
            rule.tags,
            rule.floating,
            rule.monitor
        );
        Classification {
            tags: rule.tags,
            is_floating: rule.floating,
            monitor: rule.monitor,
        }
    }
}
