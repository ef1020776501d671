//! Shared fixtures: a device record with a flattened basic block, a public
//! extended block and a confidential meta block.

#![allow(dead_code)]

use sifter::Sift;

#[derive(Clone, Debug, Sift)]
pub struct DeviceInfoBasic {
    #[sift(json = "domain")]
    pub domain: i64,
    #[sift(json = "sub_domain")]
    pub sub_domain: i64,
    #[sift(json = "physical_device_id")]
    pub physical_device_id: String,
}

#[derive(Clone, Debug, Sift)]
pub struct DeviceInfoExtended {
    #[sift(json = "image_url", confidential = "level0")]
    pub image_url: String,
}

#[derive(Clone, Debug, Sift)]
pub struct DeviceInfoMeta {
    #[sift(json = "country", confidential = "level1")]
    pub country: String,
    #[sift(json = "province", confidential = "level1")]
    pub province: String,
    #[sift(json = "city", confidential = "level1")]
    pub city: String,
    #[sift(json = "ip", confidential = "level1")]
    pub ip: String,
    #[sift(json = "mod_version", confidential = "level1")]
    pub mod_version: String,
    #[sift(json = "dev_version", confidential = "level1")]
    pub dev_version: String,
}

#[derive(Clone, Debug, Sift)]
pub struct DeviceInfo {
    #[sift(embed)]
    pub basic: DeviceInfoBasic,
    #[sift(json = "extended", confidential = "level0", nested)]
    pub extended: DeviceInfoExtended,
    #[sift(json = "meta", confidential = "level1", nested)]
    pub meta: DeviceInfoMeta,
}

pub fn device(index: i64) -> DeviceInfo {
    DeviceInfo {
        basic: DeviceInfoBasic {
            domain: index * 2,
            sub_domain: index * 10,
            physical_device_id: format!("123456ABCDEF{index}"),
        },
        extended: DeviceInfoExtended {
            image_url: format!("http://image.com/image_uri/{index}"),
        },
        meta: DeviceInfoMeta {
            country: "us+china+eu+south-africa".into(),
            province: "whatever-province".into(),
            city: "some-city".into(),
            ip: "1.2.3.4".into(),
            mod_version: format!("mod-version-1-2-3{index}"),
            dev_version: format!("dev-version-4-5-6{index}"),
        },
    }
}
