use regex::Regex;

/// Direct MP4 under a CloudFront distribution
pub const CLOUDFRONT_PATTERN: &str = r#"(?i)https://[a-z0-9]+\.cloudfront\.net/[^"'\s]+\.mp4"#;

/// `src="....mp4"` on any tag; group 1 is the path up to `.mp4`
pub const SRC_ATTRIBUTE_PATTERN: &str = r#"(?i)src=["']([^"']+\.mp4)[^"']*"#;

/// Last resort: any absolute http(s) URL ending in `.mp4`
pub const GENERIC_PATTERN: &str = r#"(?i)https?://[^"'\s]+\.mp4"#;

/// A video URL found in a sub-page, with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMatch {
    pub url: String,
    pub matcher: String,
}

/// One rule for pulling a video URL out of a sub-page body
pub trait VideoMatcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns the first video URL this rule finds, if any
    fn find(&self, body: &str) -> Option<String>;
}

/// Matcher backed by a regex; yields capture group 1 when the pattern has one
#[derive(Debug)]
pub struct RegexMatcher {
    name: String,
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
        })
    }
}

impl VideoMatcher for RegexMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, body: &str) -> Option<String> {
        let caps = self.regex.captures(body)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    }
}

/// Ordered list of matchers; the first one that matches wins
pub struct MatcherChain {
    matchers: Vec<Box<dyn VideoMatcher>>,
}

impl Default for MatcherChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl MatcherChain {
    /// The three built-in rules in priority order
    pub fn standard() -> Self {
        Self::with_extra_patterns(&[]).expect("Built-in video patterns should be valid")
    }

    /// Built-in rules with user patterns tried after `src-attribute` and
    /// before the generic fallback
    pub fn with_extra_patterns(patterns: &[String]) -> Result<Self, regex::Error> {
        let mut matchers: Vec<Box<dyn VideoMatcher>> = vec![
            Box::new(RegexMatcher::new("cloudfront", CLOUDFRONT_PATTERN)?),
            Box::new(RegexMatcher::new("src-attribute", SRC_ATTRIBUTE_PATTERN)?),
        ];
        for (i, pattern) in patterns.iter().enumerate() {
            matchers.push(Box::new(RegexMatcher::new(format!("custom-{}", i + 1), pattern)?));
        }
        matchers.push(Box::new(RegexMatcher::new("generic", GENERIC_PATTERN)?));

        Ok(Self { matchers })
    }

    /// Appends a matcher at the lowest priority
    pub fn push(&mut self, matcher: Box<dyn VideoMatcher>) {
        self.matchers.push(matcher);
    }

    /// Names of the matchers in the order they are tried
    pub fn names(&self) -> Vec<&str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Tries each matcher in order and stops at the first hit
    pub fn find(&self, body: &str) -> Option<VideoMatch> {
        self.matchers.iter().find_map(|m| {
            m.find(body).map(|url| {
                ::log::trace!("Matcher {} found {}", m.name(), url);
                VideoMatch {
                    url,
                    matcher: m.name().to_string(),
                }
            })
        })
    }
}
