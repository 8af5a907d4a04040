use serde::Deserialize;
use pulsegate_core::error::{PulsegateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulsegateError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.gateway.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                PulsegateError::Config(format!(
                    "gateway.listen must be a valid socket address: {e}"
                ))
            })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Upper bounds, in seconds, for the response-duration histogram.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        // Registration validates too, but a bad spec should fail here with a
        // config error before any family is declared.
        if self.duration_buckets.is_empty() {
            return Err(PulsegateError::Config(
                "metrics.duration_buckets must not be empty".into(),
            ));
        }
        for w in self.duration_buckets.windows(2) {
            if !(w[0] < w[1]) {
                return Err(PulsegateError::Config(
                    "metrics.duration_buckets must be strictly increasing".into(),
                ));
            }
        }
        if self.duration_buckets.iter().any(|b| !b.is_finite()) {
            return Err(PulsegateError::Config(
                "metrics.duration_buckets must be finite".into(),
            ));
        }
        Ok(())
    }
}

fn default_duration_buckets() -> Vec<f64> {
    vec![0.1, 0.5, 1.0, 2.0, 5.0]
}
