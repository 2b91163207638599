use std::io::BufRead;

use {
    anyhow::{Context, Result, bail},
    base64::Engine,
    clap::Args,
    passkeep_config::{KeyDerivation, PasskeepConfig},
    passkeep_crypto::{
        CredentialHasher, HashParams, SymmetricCipher, SymmetricKey, derive_user_key,
        kdf::{self, KdfParams},
        random::OsRandom,
        verify_password,
    },
    secrecy::{ExposeSecret, SecretString},
    tracing::{debug, info},
};

/// Inputs for deriving the encryption key.
///
/// `keys.kdf = "sha256"` needs `--user-id`; `keys.kdf = "argon2id"` needs a
/// passphrase and, to reopen existing data, the salt printed at encryption.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Numeric user id (sha256 key derivation).
    #[arg(long)]
    pub user_id: Option<u64>,
    /// Passphrase (argon2id key derivation).
    #[arg(long, env = "PASSKEEP_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,
    /// Base64 salt (argon2id key derivation).
    #[arg(long)]
    pub salt: Option<String>,
}

/// Derive the key; returns a freshly generated salt when one had to be made.
fn resolve_key(
    config: &PasskeepConfig,
    args: &KeyArgs,
    allow_new_salt: bool,
) -> Result<(SymmetricKey, Option<String>)> {
    match config.keys.kdf {
        KeyDerivation::Sha256 => {
            let Some(user_id) = args.user_id else {
                bail!("--user-id is required when keys.kdf = \"sha256\"");
            };
            debug!(user_id, "deriving key from user id");
            Ok((derive_user_key(&config.keys.namespace, user_id), None))
        },
        KeyDerivation::Argon2id => {
            let passphrase = args
                .passphrase
                .clone()
                .map(SecretString::new)
                .context("--passphrase is required when keys.kdf = \"argon2id\"")?;

            let (salt_b64, generated) = match &args.salt {
                Some(salt) => (salt.clone(), false),
                None if allow_new_salt => (kdf::generate_salt(&OsRandom)?, true),
                None => bail!("--salt is required to reopen argon2id-protected data"),
            };
            let salt = kdf::decode_salt(&salt_b64).context("invalid --salt")?;

            let a = &config.keys.argon2;
            let params = KdfParams {
                m_cost: a.m_cost,
                t_cost: a.t_cost,
                p_cost: a.p_cost,
            };
            let key =
                kdf::derive_passphrase_key(passphrase.expose_secret().as_bytes(), &salt, &params)?;
            Ok((key, generated.then_some(salt_b64)))
        },
    }
}

/// Use `arg` if given, else read one line from `reader` (newline stripped).
fn read_secret_from(arg: Option<String>, reader: &mut impl BufRead) -> Result<SecretString> {
    if let Some(value) = arg {
        return Ok(SecretString::new(value));
    }
    let mut line = String::new();
    reader.read_line(&mut line).context("failed to read stdin")?;
    let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::new(trimmed))
}

pub(crate) fn read_secret(arg: Option<String>) -> Result<SecretString> {
    read_secret_from(arg, &mut std::io::stdin().lock())
}

fn hasher(config: &PasskeepConfig) -> Result<CredentialHasher> {
    let h = &config.hashing;
    Ok(CredentialHasher::new(HashParams {
        m_cost: h.m_cost,
        t_cost: h.t_cost,
        p_cost: h.p_cost,
    })?)
}

pub fn hash(config: &PasskeepConfig, password: Option<String>) -> Result<()> {
    let password = read_secret(password)?;
    let hash = hasher(config)?.hash(password.expose_secret())?;
    println!("{hash}");
    Ok(())
}

pub fn verify(hash: &str, password: Option<String>) -> Result<()> {
    let password = read_secret(password)?;
    if !verify_password(password.expose_secret(), hash) {
        bail!("password does not match");
    }
    println!("ok");
    Ok(())
}

pub fn derive_key(config: &PasskeepConfig, args: &KeyArgs) -> Result<()> {
    let (key, new_salt) = resolve_key(config, args, true)?;
    if let Some(salt) = new_salt {
        eprintln!("salt: {salt}");
    }
    println!(
        "{}",
        base64::engine::general_purpose::STANDARD.encode(key.as_bytes())
    );
    Ok(())
}

pub fn encrypt(config: &PasskeepConfig, args: &KeyArgs, value: Option<String>) -> Result<()> {
    let (key, new_salt) = resolve_key(config, args, true)?;
    let value = read_secret(value)?;
    let ciphertext = SymmetricCipher::new().encrypt(value.expose_secret().as_bytes(), &key)?;
    if let Some(salt) = new_salt {
        info!("generated a new salt; keep it with the ciphertext");
        eprintln!("salt: {salt}");
    }
    println!("{ciphertext}");
    Ok(())
}

/// Decrypt pasted or piped ciphertext, trimming surrounding whitespace first.
fn open(config: &PasskeepConfig, args: &KeyArgs, ciphertext: &str) -> Result<String> {
    let (key, _) = resolve_key(config, args, false)?;
    Ok(SymmetricCipher::new().decrypt_string(ciphertext.trim(), &key)?)
}

pub fn decrypt(
    config: &PasskeepConfig,
    args: &KeyArgs,
    ciphertext: Option<String>,
) -> Result<()> {
    let ciphertext = read_secret(ciphertext)?;
    let plaintext = open(config, args, ciphertext.expose_secret())?;
    println!("{plaintext}");
    Ok(())
}
