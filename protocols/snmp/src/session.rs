/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::net::SocketAddr;

use async_trait::async_trait;
use csnmp::message::BindingValue;
use csnmp::{ObjectIdentifier, ObjectValue, Snmp2cClient, SnmpClientError};
use log::{debug, info};
use tokio::net;

use super::config::{HostConfig, SnmpVersion};
use super::error::{Error, Result};
use super::oid::Oid;
use super::value::Value;
use super::walk::WalkMap;

/// The two primitives a check needs from an SNMP agent.
#[async_trait]
pub trait Session {
    /// Bulk-retrieve all instances below each of the given columns.
    async fn walk_columns(&self, columns: &[Oid]) -> Result<WalkMap>;
    /// Retrieve the given instances in one request.
    async fn get(&self, oids: &[Oid]) -> Result<WalkMap>;
}

pub struct Snmp2cSession {
    client: Snmp2cClient,
    max_repetitions: u32,
}

impl Snmp2cSession {
    pub async fn open(host: &str, config: &HostConfig) -> Result<Self> {
        if config.version != SnmpVersion::V2c {
            return Err(Error::UnsupportedVersion(config.version));
        }

        let target = net::lookup_host((host, config.port))
            .await?
            .next()
            .ok_or_else(|| Error::NoAddress(host.to_string()))?;
        let bind: SocketAddr = match target {
            SocketAddr::V4(_) => ([0, 0, 0, 0], 0).into(),
            SocketAddr::V6(_) => ([0u16; 8], 0).into(),
        };

        info!(
            "SNMP: opening v{} session to {} (timeout {:.1}s, {} retries)",
            config.version, target, config.timing.timeout, config.timing.retries
        );

        let client = Snmp2cClient::new(
            target,
            config.community.as_bytes().to_vec(),
            Some(bind),
            Some(config.timing.timeout()),
            config.timing.retries,
        )
        .await
        .map_err(Error::Connection)?;

        Ok(Self {
            client,
            max_repetitions: config.bulk.max_repetitions.max(1),
        })
    }

    async fn get_each(&self, oids: &[Oid]) -> Result<WalkMap> {
        let mut data = WalkMap::new();
        for oid in oids {
            let value = match self.client.get(to_csnmp(oid)?).await {
                Ok(value) => convert_value(value)?,
                Err(SnmpClientError::FailedBinding { binding }) => {
                    convert_exception(&binding.value)
                }
                Err(e) => return Err(Error::Query(e)),
            };
            data.insert(oid.clone(), value);
        }
        Ok(data)
    }
}

#[async_trait]
impl Session for Snmp2cSession {
    async fn walk_columns(&self, columns: &[Oid]) -> Result<WalkMap> {
        let mut data = WalkMap::new();
        for column in columns {
            debug!("SNMP: walking {}", column);
            let vars = self
                .client
                .walk_bulk(to_csnmp(column)?, self.max_repetitions)
                .await
                .map_err(Error::Query)?;
            for (oid, value) in vars {
                data.insert(from_csnmp(&oid)?, convert_value(value)?);
            }
        }
        Ok(data)
    }

    async fn get(&self, oids: &[Oid]) -> Result<WalkMap> {
        debug!("SNMP: get for {} oids", oids.len());
        let request = oids.iter().map(to_csnmp).collect::<Result<Vec<_>>>()?;
        match self.client.get_multiple(request).await {
            Ok(vars) => vars
                .into_iter()
                .map(|(oid, value)| {
                    Ok((from_csnmp(&oid)?, convert_value(value)?))
                })
                .collect(),
            /* One exception value fails the whole request; fall back to
             * one request per oid so that the others are still returned. */
            Err(SnmpClientError::FailedBinding { binding }) => {
                debug!(
                    "SNMP: get: {} = {:?}, retrying per oid",
                    binding.name, binding.value
                );
                self.get_each(oids).await
            }
            Err(e) => Err(Error::Query(e)),
        }
    }
}

fn to_csnmp(oid: &Oid) -> Result<ObjectIdentifier> {
    oid.to_string()
        .parse()
        .map_err(|_| Error::InvalidOid(oid.to_string()))
}

fn from_csnmp(oid: &ObjectIdentifier) -> Result<Oid> {
    oid.to_string().parse()
}

fn convert_value(value: ObjectValue) -> Result<Value> {
    Ok(match value {
        ObjectValue::Integer(v) => Value::Integer(v.into()),
        ObjectValue::String(v) => Value::OctetStr(v),
        ObjectValue::ObjectId(v) => Value::Oid(from_csnmp(&v)?),
        ObjectValue::IpAddress(v) => Value::IpAddress(v.octets()),
        ObjectValue::Counter32(v) => Value::Counter(v.into()),
        ObjectValue::Unsigned32(v) => Value::Gauge(v.into()),
        ObjectValue::TimeTicks(v) => Value::TimeTicks(v.into()),
        ObjectValue::Opaque(v) => Value::Opaque(v),
        ObjectValue::Counter64(v) => Value::Counter(v),
    })
}

fn convert_exception(value: &BindingValue) -> Value {
    match value {
        BindingValue::NoSuchInstance => Value::NoSuchInstance,
        BindingValue::EndOfMibView => Value::EndOfMibView,
        _ => Value::NoSuchObject,
    }
}
