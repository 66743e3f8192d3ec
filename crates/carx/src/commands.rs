use colored::Colorize;
use serde_json::{json, Value};

pub struct Client {
    base: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn get(&self, path: &str) -> Result<Value, String> {
        let url = format!("{}{}", self.base, path);
        let resp = self.http.get(&url).send().map_err(|e| format!("request failed: {e}"))?;
        read_reply(resp)
    }

    fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, String> {
        let url = format!("{}{}", self.base, path);
        let mut req = self.http.post(&url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().map_err(|e| format!("request failed: {e}"))?;
        read_reply(resp)
    }
}

/// Turn a reply envelope into its JSON, or `HTTP <code>: <error>` on failure.
fn read_reply(resp: reqwest::blocking::Response) -> Result<Value, String> {
    let status = resp.status();
    let json: Value = resp.json().map_err(|e| format!("parse response: {e}"))?;
    if status.is_success() {
        return Ok(json);
    }
    let detail = json
        .get("error")
        .and_then(|d| d.as_str())
        .unwrap_or("unknown error");
    Err(format!("HTTP {}: {detail}", status.as_u16()))
}

pub fn health(client: &Client) -> Result<(), String> {
    let json = client.get("/is-alive")?;
    if json.get("is_active").and_then(|v| v.as_bool()).unwrap_or(false) {
        println!("{} {}", "●".green(), "alive".green().bold());
        Ok(())
    } else {
        Err("server reports inactive".into())
    }
}

pub fn generate(client: &Client) -> Result<(), String> {
    let json = client.post("/generate-car", None)?;
    let output = json.get("output").and_then(|o| o.as_str()).unwrap_or("?");
    println!("{} {}", "Packed:".dimmed(), output.cyan());
    Ok(())
}

pub fn upload(client: &Client, token: &str) -> Result<(), String> {
    let json = client.post("/upload-car", Some(&json!({ "token": token })))?;
    let cid = json.get("cid").and_then(|c| c.as_str()).unwrap_or("?");
    println!("{} {}", "Root CID:".dimmed(), cid.cyan());
    Ok(())
}

pub fn cid(client: &Client, base58: &[String]) -> Result<(), String> {
    let files: Vec<Value> = base58.iter().map(|b| json!({ "base58": b })).collect();
    let json = client.post("/get-cid", Some(&json!({ "files": files })))?;
    let out = json
        .get("files")
        .and_then(|f| f.as_array())
        .ok_or("parse response: missing files")?;
    for (legacy, file) in base58.iter().zip(out) {
        let cid = file.get("cid").and_then(|c| c.as_str()).unwrap_or("?");
        print_pair(legacy, cid);
    }
    Ok(())
}

pub fn normalize(base58: &[String]) -> Result<(), String> {
    for legacy in base58 {
        let cid = car_cid::normalize_cid(legacy)
            .map_err(|e| format!("invalid identifier {legacy:?}: {e}"))?;
        print_pair(legacy, &cid);
    }
    Ok(())
}

fn print_pair(legacy: &str, cid: &str) {
    println!("{} {} {}", legacy.dimmed(), "→".dimmed(), cid.cyan());
}
