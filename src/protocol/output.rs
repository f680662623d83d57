use serde::Serialize;
use serde_json::Value;

/// A blocking or approving verdict a hook may attach to its result.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HookDecision {
    Block,
    Approve,
}

/// The uniform envelope every hook run produces before it is projected onto
/// stdout, stderr and the exit code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HookResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<HookDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub hook_name: String,
}

/// What the process should emit and how it should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookExit {
    pub code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl HookResult {
    fn empty(hook_name: &str) -> Self {
        HookResult {
            success: None,
            error: None,
            decision: None,
            reason: None,
            data: None,
            hook_name: hook_name.to_string(),
        }
    }

    pub fn success(hook_name: &str, data: Option<Value>) -> Self {
        HookResult {
            success: Some(true),
            data,
            ..Self::empty(hook_name)
        }
    }

    pub fn error(hook_name: &str, message: impl Into<String>) -> Self {
        HookResult {
            success: Some(false),
            error: Some(message.into()),
            ..Self::empty(hook_name)
        }
    }

    pub fn block(hook_name: &str, reason: impl Into<String>) -> Self {
        HookResult {
            decision: Some(HookDecision::Block),
            reason: Some(reason.into()),
            ..Self::empty(hook_name)
        }
    }

    pub fn approve(hook_name: &str, reason: impl Into<String>) -> Self {
        HookResult {
            decision: Some(HookDecision::Approve),
            reason: Some(reason.into()),
            ..Self::empty(hook_name)
        }
    }

    /// Project the envelope onto process output. Total over all field
    /// combinations; checked in this order:
    ///
    /// - `success == false` → error on stderr, exit 2 when blocking, else 1
    /// - `decision == block` → reason on stderr, exit 2
    /// - `decision == approve` → whole envelope as JSON on stdout, exit 0
    /// - otherwise → `data` as JSON on stdout when present and non-empty, exit 0
    pub fn to_exit(&self) -> HookExit {
        let blocking = self.decision == Some(HookDecision::Block);

        if self.success == Some(false) {
            return HookExit {
                code: if blocking { 2 } else { 1 },
                stdout: None,
                stderr: Some(self.error.clone().unwrap_or_default()),
            };
        }
        if blocking {
            return HookExit {
                code: 2,
                stdout: None,
                stderr: Some(self.reason.clone().unwrap_or_default()),
            };
        }
        if self.decision == Some(HookDecision::Approve) {
            return HookExit {
                code: 0,
                stdout: Some(to_json(self)),
                stderr: None,
            };
        }
        HookExit {
            code: 0,
            stdout: self.data.as_ref().filter(|d| !is_empty(d)).map(to_json),
            stderr: None,
        }
    }
}

/// Null, `false`, zero, and empty strings/arrays/objects print nothing.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Serialize a `Value` or the envelope to compact JSON.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen: every map key is a
/// string and the derived `Serialize` impl only holds strings, bools, enums
/// and `Value`s.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("hook result serialization cannot fail")
}
