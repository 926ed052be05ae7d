use crate::error::{Error, Result};
use crate::{ColumnNames, DataSource, Series, VERSION};
use std::time::Duration;
use tracing::{debug, info};

/// Settings for loading the step series.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub source: DataSource,
    pub columns: ColumnNames,
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            source: DataSource::default(),
            columns: ColumnNames::default(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// GET the csv document, failing on transport errors and on any non-2xx status.
pub fn fetch_csv(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let fetch_err = |source: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(format!("steps_plot/{}", VERSION.unwrap_or("unknown")))
        .build()
        .map_err(fetch_err)?;
    debug!("GET {} with timeout {:?}", url, timeout);
    let response = client.get(url).send().map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().map_err(fetch_err)?;
    debug!("received {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

/// Load the series from the configured source, one request or one file read.
pub fn load(config: &LoaderConfig) -> Result<Series> {
    info!("read data from {}", config.source);
    let series = match &config.source {
        DataSource::Url(url) => {
            let body = fetch_csv(url, config.timeout)?;
            Series::from_csv_reader(body.as_slice(), &config.columns)?
        }
        DataSource::File(path) => Series::from_csv(path, &config.columns)?,
    };
    info!("loaded {} observations", series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Instant;

    /// Serve a single response on a random local port and return its url.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/steps.csv", addr)
    }

    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/steps.csv", addr)
    }

    #[test]
    fn loads_series_over_http() {
        let url = serve_once("200 OK", "Date,Steps\n2023-01-01,5000\n2023-01-02,7500\n2023-01-03,0\n");
        let config = LoaderConfig {
            source: DataSource::Url(url),
            ..Default::default()
        };
        let s = load(&config).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.steps, vec![5000, 7500, 0]);
    }

    #[test]
    fn not_found_is_a_fetch_error() {
        let url = serve_once("404 Not Found", "nope");
        let err = fetch_csv(&url, Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        match err {
            Error::Status { url: u, status } => {
                assert_eq!(u, url);
                assert_eq!(status.as_u16(), 404);
            }
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn unreachable_host_is_a_fetch_error() {
        let url = closed_port_url();
        let err = fetch_csv(&url, Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains(&url));
    }

    #[test]
    fn empty_body_loads_no_observations() {
        let url = serve_once("200 OK", "");
        let config = LoaderConfig {
            source: DataSource::Url(url),
            ..Default::default()
        };
        let s = load(&config).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn silent_server_hits_the_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/steps.csv", listener.local_addr().unwrap());
        // accept and hold the connection without ever answering
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(10));
                drop(stream);
            }
        });
        let start = Instant::now();
        let err = fetch_csv(&url, Duration::from_secs(1)).unwrap_err();
        let elapsed = start.elapsed();
        assert!(matches!(err, Error::Fetch { .. }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
    }

    #[test]
    fn loads_series_from_file() {
        let config = LoaderConfig {
            source: DataSource::File("./test/steps.csv".into()),
            ..Default::default()
        };
        assert_eq!(load(&config).unwrap().len(), 3);
    }
}
